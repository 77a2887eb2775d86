//! Shared test harness modules for the loadplan CLI.

use super::*;
use crate::evaluate::{
    EvaluateConfig, EvaluateRequest, config_from_layers_for_test, load_evaluate_request,
    load_fleet, run_evaluate_with,
};

mod helpers;
