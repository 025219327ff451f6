mod bid;
mod marketplace;
mod user;

pub use bid::{Bid, BidStatus};
pub use marketplace::{Agreement, Payment, Rating, ServiceRequest};
pub use user::{ProfilePatch, User, UserProfile, UserType};
