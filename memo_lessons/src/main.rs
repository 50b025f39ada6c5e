// Copyright 2026 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Runs every lesson, logging each child render and a summary per lesson.
//!
//! Use `RUST_LOG=trace` to also see every skip decision.

use std::process::ExitCode;

use memo_lessons::tracing_backend::try_init_tracing;
use memo_lessons::{all_lessons, run};

/// Clicks per lesson, after the first render.
const CLICKS: u32 = 3;

fn main() -> ExitCode {
    let _ = try_init_tracing();

    let lessons = match all_lessons() {
        Ok(lessons) => lessons,
        Err(err) => {
            tracing::error!("Failed to declare lessons: {err}");
            return ExitCode::FAILURE;
        }
    };
    for mut lesson in lessons {
        match run(lesson.as_mut(), CLICKS) {
            Ok(report) => {
                let rendered: Vec<String> = report
                    .children
                    .iter()
                    .map(|child| format!("{}={}", child.child, child.renders))
                    .collect();
                tracing::info!(
                    "{}: {} passes, renders [{}]",
                    report.lesson,
                    report.passes,
                    rendered.join(", ")
                );
            }
            Err(err) => {
                tracing::error!(lesson = lesson.name(), "Lesson failed: {err}");
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
