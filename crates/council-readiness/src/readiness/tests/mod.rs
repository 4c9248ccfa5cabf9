mod common;
mod score;
