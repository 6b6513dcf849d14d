use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UpdateStockRequest {
    pub stock: Option<i32>,
}

/// Text fields collected from the multipart form of `POST /api/parts`.
#[derive(Debug, Default)]
pub struct CreatePartForm {
    pub name: Option<String>,
    pub stock: Option<String>,
}

impl CreatePartForm {
    pub fn validate(self) -> Result<(String, i32), &'static str> {
        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or("name is required")?;
        let stock = self
            .stock
            .ok_or("stock is required")?
            .trim()
            .parse::<i32>()
            .map_err(|_| "stock must be an integer")?;
        Ok((name, stock))
    }
}
