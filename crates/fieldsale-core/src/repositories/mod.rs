//! Repositories: one per domain area, one observable slot per operation.
//!
//! Every operation publishes `Loading` when invoked and returns a future
//! that performs the work and resolves to the terminal envelope.

mod auth;
mod customers;
mod orders;
mod products;
mod recommendations;
mod seller;
mod user;
mod visits;

pub use auth::AuthRepository;
pub use customers::CustomerRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use recommendations::RecommendationRepository;
pub use seller::SellerRepository;
pub use user::UserRepository;
pub use visits::VisitRepository;
