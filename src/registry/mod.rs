//! Default registry settings used when normalizing image references

mod default;

pub use default::*;
