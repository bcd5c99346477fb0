use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub release_date: Option<Date>,
    pub rating: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::actors_movies::Entity")]
    ActorsMovies,
}

impl Related<super::actors_movies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActorsMovies.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
