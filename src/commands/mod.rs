pub mod preview;
pub mod results;
pub mod sections;
