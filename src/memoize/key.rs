// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

/// The leading positional arguments of a call. Two calls share a cache entry
/// exactly when their keys are equal.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct ArgsKey<A>(pub Vec<A>);

impl<A: Clone> ArgsKey<A> {
    /// Keeps the first `num_args` arguments, or all of them when `num_args` is `None`.
    pub fn from_args(args: &[A], num_args: Option<usize>) -> Self {
        let end = num_args.map_or(args.len(), |n| n.min(args.len()));
        Self(args[..end].to_vec())
    }
}

impl<A> ArgsKey<A> {
    /// Returns `true` for the key shared by all calls (no arguments kept).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of arguments in the key.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}
