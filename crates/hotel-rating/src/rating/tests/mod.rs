mod aggregation;
mod boundary;
mod common;
mod explanation;
