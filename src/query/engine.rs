// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::{braced_names, expand, format_braced, QueryParams, Row};
use crate::common::{Error, WadConfig};
use crate::log::StringLogger;
use serde::Deserialize;
use std::collections::HashMap;

/// A relational store that runs parameterized queries.
pub trait QueryEngine {
    /// Runs `query`, binding each `:name` placeholder from `params`, and returns
    /// the result rows keyed by column name.
    fn execute(&self, query: &str, params: &QueryParams) -> Result<Vec<Row>, Error>;
}

/// Expands list parameters, inlines `{name}` literals, then runs the query.
pub fn results_as_dicts<E: QueryEngine + ?Sized>(
    engine: &E,
    query: &str,
    params: QueryParams,
    logger: &StringLogger,
) -> Result<Vec<Row>, Error> {
    let (query, params) = expand(query, params)?;
    let inlined = braced_names(&query);
    if !inlined.is_empty() {
        logger.trace(format!("inlining {}", inlined.join(", ")));
    }
    let query = format_braced(&query, &params)?;
    logger.call(format!("execute({query})"), engine.execute(&query, &params))
}

/// Named database connection strings from the `[database.engines]` table.
///
/// ```toml
/// [database.engines]
/// reporting = "mysql://reader@replica:3306/shop"
/// ```
#[derive(Debug, Default)]
pub struct QueryEngines {
    debug: bool,
    engines: HashMap<String, String>,
}

impl QueryEngines {
    /// Reads engine aliases. A missing `[database]` table means no aliases.
    pub fn new(wad_config: &WadConfig) -> Result<Self, Error> {
        #[derive(Default, Deserialize)]
        struct DatabaseConfig {
            #[serde(default)]
            engines: HashMap<String, String>,
        }
        #[derive(Deserialize)]
        struct ConfigToml {
            #[serde(default)]
            database: DatabaseConfig,
        }
        let ConfigToml {
            database: DatabaseConfig { engines },
        } = wad_config.get()?;
        Ok(Self {
            debug: wad_config.debug(),
            engines,
        })
    }

    /// Whether log lines are echoed.
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Returns the connection string for `engine`; anything that is not an alias
    /// is assumed to be a connection string already.
    pub fn resolve<'a>(&'a self, engine: &'a str) -> &'a str {
        self.engines.get(engine).map(String::as_str).unwrap_or(engine)
    }

    /// Resolves `engine`, connects with `connect` and runs the query.
    pub fn results_as_dicts<E: QueryEngine>(
        &self,
        engine: &str,
        connect: impl FnOnce(&str) -> Result<E, Error>,
        query: &str,
        params: QueryParams,
    ) -> Result<(Vec<Row>, StringLogger), Error> {
        let logger = StringLogger::new(self.debug);
        let url = self.resolve(engine);
        if url != engine {
            logger.trace(format!("engine {engine} resolved"));
        }
        let engine = logger.call(format!("connect({engine})"), connect(url))?;
        let rows = results_as_dicts(&engine, query, params, &logger)?;
        Ok((rows, logger))
    }
}
