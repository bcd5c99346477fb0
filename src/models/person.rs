use crate::entities::people;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: i32,
    pub name: String,
    pub surname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patronymic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
}

impl From<people::Model> for Person {
    fn from(m: people::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            surname: m.surname,
            patronymic: m.patronymic,
            age: m.age,
            gender: m.gender,
            nationality: m.nationality,
        }
    }
}

/// Body of `POST /person/save`. Derived fields are filled in by enrichment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPerson {
    pub name: String,
    pub surname: String,
    #[serde(default)]
    pub patronymic: Option<String>,
}

/// Fields produced by the age/gender/nationality lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enrichment {
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub nationality: Option<String>,
}

/// Body of `PUT /person/update`. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonUpdate {
    pub id: i32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub patronymic: Option<String>,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
}

impl PersonUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.surname.is_none()
            && self.patronymic.is_none()
            && self.age.is_none()
            && self.gender.is_none()
            && self.nationality.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_omits_missing_fields() {
        let person = Person {
            id: 1,
            name: "Leo".to_string(),
            surname: "Kim".to_string(),
            patronymic: None,
            age: Some(1),
            gender: Some(String::new()),
            nationality: None,
        };

        let json = serde_json::to_value(&person).unwrap();
        assert_eq!(json["age"], 1);
        assert_eq!(json["gender"], "");
        assert!(json.get("patronymic").is_none());
        assert!(json.get("nationality").is_none());
    }

    #[test]
    fn test_update_with_only_id_is_empty() {
        let update: PersonUpdate = serde_json::from_str(r#"{"id": 3}"#).unwrap();
        assert!(update.is_empty());

        let update: PersonUpdate = serde_json::from_str(r#"{"id": 3, "patronymic": "X"}"#).unwrap();
        assert!(!update.is_empty());
    }
}
