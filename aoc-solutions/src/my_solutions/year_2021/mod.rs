pub mod day_4;
