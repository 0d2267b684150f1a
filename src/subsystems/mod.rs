pub mod climber;

pub use climber::Climber;
