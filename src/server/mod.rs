pub mod dlr;
