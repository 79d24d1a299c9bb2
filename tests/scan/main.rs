mod coverage;
mod hardcoded;
mod icu_messages;
mod keys;

pub mod util;
