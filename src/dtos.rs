use serde::{Deserialize, Serialize};

use crate::domain::{Product, Rating};

// Every field is required: a body missing any of them fails to decode as a whole.
#[derive(Debug, Deserialize, Serialize)]
pub struct ProductResponse{
    pub id: i64,
    pub title: String,
    pub price: f64,
    pub category: String,
    pub image: String,
    pub rating: RatingResponse,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RatingResponse{
    pub rate: f64,
    pub count: i64,
}

impl From<RatingResponse> for Rating {
    fn from(response: RatingResponse) -> Self {
        Rating {
            rate: response.rate,
            count: response.count,
        }
    }
}

impl From<ProductResponse> for Product {
    fn from(response: ProductResponse) -> Self {
        Product {
            id: response.id,
            title: response.title,
            price: response.price,
            category: response.category,
            image: response.image,
            rating: response.rating.into(),
        }
    }
}
