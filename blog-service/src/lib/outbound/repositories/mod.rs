pub mod likes;
pub mod post;
pub mod user;

pub use likes::PostgresLikeLedger;
pub use post::PostgresPostRepository;
pub use user::PostgresUserRepository;
