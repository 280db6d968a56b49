pub mod ack;
pub mod date_range;
pub mod file_state;
pub mod prediction;
pub mod room_id;

pub use ack::Ack;
pub use date_range::{format_wire_date, parse_user_date, DateRange, DateSelection};
pub use file_state::FileState;
pub use prediction::{DailyPrediction, PredictRequest, RoomPrediction};
pub use room_id::RoomId;
