pub mod journals;
pub mod moods;
