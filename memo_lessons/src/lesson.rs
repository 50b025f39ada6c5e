// Copyright 2026 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! The pieces every lesson is made of: children, the parent's passes, and the report.

use memo_core::{InputSet, MemoizedUnit, Schema, SchemaError, Value, never_equal, shallow_equal};

/// Whether a child skips rendering when its props are unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Memoization {
    /// A plain child, which renders whenever its parent does.
    Never,
    /// A memoized child, which skips rendering when its props are shallowly equal.
    Shallow,
}

/// What a child did during one pass of its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassOutcome {
    /// The child rendered.
    Rendered,
    /// Rendering was skipped, and the previous output reused.
    Skipped,
}

type Render = Box<dyn FnMut(&InputSet) -> String>;
type Compare = fn(&InputSet, &InputSet) -> bool;

/// A child component, rendering a description of its props.
pub struct Child {
    name: &'static str,
    schema: Schema,
    unit: MemoizedUnit<InputSet, String, Render, Compare>,
    log: Vec<PassOutcome>,
}

impl Child {
    /// Declares a child with the given prop names.
    pub fn new(
        name: &'static str,
        memoization: Memoization,
        props: &[&'static str],
        mut render: impl FnMut(&InputSet) -> String + 'static,
    ) -> Result<Self, SchemaError> {
        let schema = Schema::new(props.iter().copied())?;
        let compare: Compare = match memoization {
            Memoization::Never => never_equal,
            Memoization::Shallow => shallow_equal,
        };
        let render: Render = Box::new(move |props: &InputSet| {
            let output = render(props);
            tracing::debug!(child = name, %output, "rendered");
            output
        });
        Ok(Self {
            name,
            schema,
            unit: MemoizedUnit::with_comparator(render, compare).named(name),
            log: Vec::new(),
        })
    }

    /// Renders this child with `props`, unless it is memoized and they are unchanged.
    pub fn render(
        &mut self,
        props: impl IntoIterator<Item = (&'static str, Value)>,
    ) -> Result<&str, SchemaError> {
        let mut inputs = self.schema.inputs();
        for (prop, value) in props {
            inputs = inputs.set(prop, value)?;
        }
        let inputs = inputs.build()?;
        let computed = self.unit.stats().computed;
        self.unit.invoke(inputs);
        self.log.push(if self.unit.stats().computed > computed {
            PassOutcome::Rendered
        } else {
            PassOutcome::Skipped
        });
        Ok(self.unit.cached_output().map_or("", String::as_str))
    }

    /// The name this child was declared with.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// How many times this child has rendered, and skipped rendering.
    pub fn report(&self) -> ChildReport {
        let stats = self.unit.stats();
        ChildReport {
            child: self.name,
            renders: stats.computed,
            skips: stats.skipped,
            log: self.log.clone(),
        }
    }
}

impl std::fmt::Debug for Child {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Child")
            .field("name", &self.name)
            .field("schema", &self.schema)
            .field("unit", &self.unit)
            .field("log", &self.log)
            .finish()
    }
}

/// An object prop, as the lessons pass it around.
#[derive(Debug)]
pub(crate) struct Person {
    pub(crate) name: &'static str,
}

/// Reads the `name` of a [`Person`] object prop.
pub(crate) fn person_name(props: &InputSet, prop: &str) -> &'static str {
    props
        .get(prop)
        .and_then(Value::as_object)
        .and_then(|object| object.downcast_ref::<Person>())
        .map_or("?", |person| person.name)
}

/// A parent component whose state changes on every click, and the children it renders.
pub trait Lesson {
    /// The name of this lesson.
    fn name(&self) -> &'static str;

    /// Updates the parent's state, as its button would.
    fn click(&mut self);

    /// Renders the parent, which passes props to each of its children.
    fn render(&mut self) -> Result<(), SchemaError>;

    /// The children of this lesson, in render order.
    fn children(&self) -> Vec<&Child>;
}

/// How often one child rendered during a lesson.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChildReport {
    /// The child's name.
    pub child: &'static str,
    /// Renders, including the first.
    pub renders: u64,
    /// Passes in which rendering was skipped.
    pub skips: u64,
    /// What the child did in each pass, in order.
    pub log: Vec<PassOutcome>,
}

/// The outcome of running a lesson.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonReport {
    /// The lesson's name.
    pub lesson: &'static str,
    /// The number of passes, including the first render.
    pub passes: u32,
    /// One entry per child.
    pub children: Vec<ChildReport>,
}

impl LessonReport {
    /// How many times the child called `child` rendered.
    pub fn renders_of(&self, child: &str) -> Option<u64> {
        self.children
            .iter()
            .find(|report| report.child == child)
            .map(|report| report.renders)
    }

    /// What the child called `child` did in each pass.
    pub fn log_of(&self, child: &str) -> Option<&[PassOutcome]> {
        self.children
            .iter()
            .find(|report| report.child == child)
            .map(|report| report.log.as_slice())
    }
}

/// Renders `lesson` once, then clicks and re-renders it `clicks` times.
pub fn run(lesson: &mut dyn Lesson, clicks: u32) -> Result<LessonReport, SchemaError> {
    let name = lesson.name();
    for pass in 0..=clicks {
        let _span = tracing::info_span!("pass", lesson = name, pass).entered();
        if pass > 0 {
            lesson.click();
        }
        lesson.render()?;
    }
    let children: Vec<_> = lesson.children().iter().map(|child| child.report()).collect();
    for child in &children {
        tracing::info!(
            lesson = name,
            child = child.child,
            renders = child.renders,
            skips = child.skips,
            "lesson finished"
        );
    }
    Ok(LessonReport {
        lesson: name,
        passes: clicks + 1,
        children,
    })
}
