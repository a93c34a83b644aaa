pub mod forms;
pub mod health;
pub mod owner;
pub mod public_forms;
pub mod submissions;
pub mod uploads;
