//! Common regex patterns for stock-list parsing.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Field separators
    pub static ref TAB_RUN: Regex = Regex::new(r"\t+").unwrap();

    pub static ref SPACE_RUN: Regex = Regex::new(r" {2,}").unwrap();

    // Leading numeric value of a cleaned price ("12.5" out of "12.5.0")
    pub static ref PRICE_PREFIX: Regex = Regex::new(r"^(\d*)(?:\.(\d*))?").unwrap();
}
