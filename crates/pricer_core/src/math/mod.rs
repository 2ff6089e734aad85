//! Numerical routines shared by the model layer.

pub mod solvers;
