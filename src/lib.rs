//! Core library for the gpa-calculator command line and desktop applications.
//!
//! A run is a one-way pipeline: [`gpa::calculator::io`] loads the first sheet
//! of a workbook, [`gpa::calculator::resolve`] maps headers to the credit,
//! grade-point and course-name roles, [`gpa::calculator::validate`] cleans the
//! rows, and [`gpa::calculator::aggregate`] computes the credit-weighted
//! average. [`gpa::calculator::pipeline`] strings these together for both
//! front ends, [`gpa::calculator::report`] renders the outcome, and
//! [`gpa::calculator::session`] holds the desktop front end's state.

pub mod gpa;

#[cfg(feature = "gui")]
pub use gpa::calculator::gui;
pub use gpa::calculator::{
    GpaError, Result, aggregate, error, io, logging, model, pipeline, report, resolve, session,
    validate,
};
