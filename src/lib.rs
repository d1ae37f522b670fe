pub mod aggregate;
pub mod api;
pub mod demo_feed;
pub mod export;
pub mod feed;
pub mod http_client;
pub mod pitch;
pub mod pitch_types;
pub mod state;
pub mod strike_zone;
