//! Core data model: validated colleague records and the ordered list that owns them

pub mod colleague;
pub mod colleague_list;

pub use colleague::{
    Colleague, ColleagueError, MAX_CITY_LEN, MAX_NAME_LEN, MAX_TIMEZONE_LEN,
};
pub use colleague_list::{ColleagueList, ListError};
