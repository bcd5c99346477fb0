use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "actors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub patronymic: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<Date>,
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

impl Related<super::movies::Entity> for Entity {
    fn to() -> RelationDef {
        super::actors_movies::Relation::Movie.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::actors_movies::Relation::Actor.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
