pub mod credentials;
pub mod discount;
pub mod errors;
pub mod landing;
pub mod order;
pub mod ports;
