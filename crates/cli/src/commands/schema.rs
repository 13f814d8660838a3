// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Schema command implementation.
//!
//! Prints the JSON Schema of a command's `-o json` output.

use schemars::schema::RootSchema;
use schemars::schema_for;

use crate::cli::SchemaCommand;
use crate::error::Result;
use crate::schema::{BacklogJson, BurndownJson, EtaJson, HealthJson, SprintsJson};

pub fn run(cmd: SchemaCommand) -> Result<()> {
    let json = serde_json::to_string_pretty(&schema(cmd))?;
    println!("{json}");
    Ok(())
}

pub(crate) fn schema(cmd: SchemaCommand) -> RootSchema {
    match cmd {
        SchemaCommand::Backlog => schema_for!(BacklogJson),
        SchemaCommand::Sprints => schema_for!(SprintsJson),
        SchemaCommand::Burndown => schema_for!(BurndownJson),
        SchemaCommand::Health => schema_for!(HealthJson),
        SchemaCommand::Eta => schema_for!(EtaJson),
    }
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
