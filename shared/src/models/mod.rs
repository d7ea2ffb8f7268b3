//! Wire models shared between the server and clients
//!
//! Field names serialize in camelCase to match the mobile client. Entity
//! structs derive `sqlx::FromRow` behind the `db` feature so the server can
//! read them straight out of query results.

mod company;
mod order;
mod product;
mod user;

pub use company::{Company, CompanySummary, CreateCompanyRequest};
pub use order::{
    BuyerInfo, CreateOrderRequest, Order, OrderStatus, ProductInfo, PurchaseView, SaleView,
    UpdateOrderStatusRequest, VendorInfo,
};
pub use product::{
    CreateProductRequest, Product, ProductSummary, UnitOfMeasure, UpdateProductRequest,
};
pub use user::{User, UserProfile};
