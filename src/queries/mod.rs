pub mod product_queries;
pub mod purchase_queries;
pub mod user_queries;
