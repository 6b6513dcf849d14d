use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct SparePart {
    pub id: i32,
    pub name: String,
    pub stock: i32,
    pub image: Option<String>, // public path under /uploads
}

#[derive(Debug, Clone)]
pub struct NewSparePart {
    pub name: String,
    pub stock: i32,
    pub image: Option<String>,
}
