mod login;
pub use login::{Login, Signup};

mod layout;
pub use layout::Protected;

mod deals;
pub use deals::{CreateDeal, DealDetail, Deals, EditDeal, Home};

mod account;
pub use account::{Profile, Settings};

mod not_found;
pub use not_found::NotFound;
