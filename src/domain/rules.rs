//! Rule Tables
//!
//! Static mappings from AVA method names to their Jest counterparts. The
//! tables are plain `static` slices: built at compile time, never mutated.

/// Destination form of an assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssertionRule {
    /// `t.<name>(a, b)` becomes `expect(a).<path>(b)`. The path is dotted,
    /// e.g. `not.toBe` or `rejects.toThrow`.
    Rename(&'static str),
    /// `t.true` / `t.false`.
    Boolean { truthy: bool },
    /// `t.throws` / `t.notThrows`.
    Throw { negated: bool },
    /// `t.plan`.
    Plan,
}

/// How an assertion call is handled by the rewrite pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssertionLookup {
    /// Terminal or no-op assertion without a Jest equivalent; left as-is.
    Excluded,
    Rule(AssertionRule),
    Unmapped,
}

/// Assertions that have no destination form and are deliberately skipped.
pub static EXCLUDED_ASSERTIONS: &[&str] = &["pass", "fail", "end", "log", "timeout", "teardown"];

/// Special-case entries. Consulted before the rename table.
pub static SPECIAL_ASSERTIONS: &[(&str, AssertionRule)] = &[
    ("true", AssertionRule::Boolean { truthy: true }),
    ("false", AssertionRule::Boolean { truthy: false }),
    ("throws", AssertionRule::Throw { negated: false }),
    ("notThrows", AssertionRule::Throw { negated: true }),
    ("plan", AssertionRule::Plan),
];

pub static RENAMED_ASSERTIONS: &[(&str, &str)] = &[
    ("is", "toBe"),
    ("not", "not.toBe"),
    ("deepEqual", "toEqual"),
    ("notDeepEqual", "not.toEqual"),
    ("like", "toMatchObject"),
    ("truthy", "toBeTruthy"),
    ("falsy", "toBeFalsy"),
    ("assert", "toBeTruthy"),
    ("regex", "toMatch"),
    ("notRegex", "not.toMatch"),
    ("snapshot", "toMatchSnapshot"),
    ("throwsAsync", "rejects.toThrow"),
    ("notThrowsAsync", "resolves.not.toThrow"),
];

pub fn lookup_assertion(name: &str) -> AssertionLookup {
    if EXCLUDED_ASSERTIONS.contains(&name) {
        return AssertionLookup::Excluded;
    }
    if let Some((_, rule)) = SPECIAL_ASSERTIONS.iter().find(|(origin, _)| *origin == name) {
        return AssertionLookup::Rule(*rule);
    }
    match RENAMED_ASSERTIONS.iter().find(|(origin, _)| *origin == name) {
        Some((_, dest)) => AssertionLookup::Rule(AssertionRule::Rename(*dest)),
        None => AssertionLookup::Unmapped,
    }
}

/// Destination of a `test.<path>(...)` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleRule {
    /// Dotted callee path in the destination framework.
    pub callee: &'static str,
    /// Hooks take no title; registrations keep theirs.
    pub drops_title: bool,
}

const fn hook(callee: &'static str) -> LifecycleRule {
    LifecycleRule { callee, drops_title: true }
}

const fn modifier(callee: &'static str) -> LifecycleRule {
    LifecycleRule { callee, drops_title: false }
}

/// Keyed by the member path below the test identifier (`after.always`).
pub static LIFECYCLE_RULES: &[(&str, LifecycleRule)] = &[
    ("before", hook("beforeAll")),
    ("after", hook("afterAll")),
    ("beforeEach", hook("beforeEach")),
    ("afterEach", hook("afterEach")),
    ("after.always", hook("afterAll")),
    ("afterEach.always", hook("afterEach")),
    ("only", modifier("test.only")),
    ("skip", modifier("test.skip")),
    ("failing", modifier("test.failing")),
    ("todo", modifier("test.todo")),
    ("serial", modifier("test")),
    ("serial.only", modifier("test.only")),
    ("serial.skip", modifier("test.skip")),
];

pub fn lookup_lifecycle(path: &str) -> Option<LifecycleRule> {
    LIFECYCLE_RULES
        .iter()
        .find(|(origin, _)| *origin == path)
        .map(|(_, rule)| *rule)
}
