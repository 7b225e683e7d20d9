pub mod block;
pub mod location;
pub mod record;
