use chemdex_schema::ResponseMolecule;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct DbMolecule {
    pub id: i64,
    pub smile: String,
}

impl DbMolecule {
    /// Plain `{id, smile}` mapping with keys in a fixed order.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("id".to_string(), Value::from(self.id));
        map.insert("smile".to_string(), Value::from(self.smile.clone()));
        map
    }
}

impl fmt::Display for DbMolecule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Molecule(id={}, smile='{}')", self.id, self.smile)
    }
}

impl From<DbMolecule> for ResponseMolecule {
    fn from(m: DbMolecule) -> Self {
        ResponseMolecule {
            id: m.id,
            smile: m.smile,
        }
    }
}
