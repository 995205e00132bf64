//! The pool design workflow.

use itertools::Itertools;
use pool_common::prefix::{is_reserved, match_space_id, spec_space_id};
use pool_common::{DesignConfig, PoolError};
use pool_driver::{Context, GraphStore};
use pool_graph::{ChainLabels, DesignSpace, PartLibrary, merge_design_spaces, parse_pool_spec, serialize_pool};
use tracing::{info, trace};

use crate::scratch::Scratch;

/// Designs pools from pool specs against the graphs in a store.
pub struct PoolDesigner<'a, S: GraphStore, L: PartLibrary> {
    store: &'a S,
    library: &'a L,
    config: DesignConfig,
    /// Matches candidates on the rayon pool when set.
    #[cfg(feature = "parallel")]
    parallel: bool,
}

impl<'a, S: GraphStore, L: PartLibrary> PoolDesigner<'a, S, L> {
    pub fn new(store: &'a S, library: &'a L) -> Self {
        Self::with_config(store, library, DesignConfig::default())
    }

    pub fn with_config(store: &'a S, library: &'a L, config: DesignConfig) -> Self {
        Self {
            store,
            library,
            config,
            #[cfg(feature = "parallel")]
            parallel: true,
        }
    }

    /// Turns parallel candidate matching on or off. On by default.
    #[cfg(feature = "parallel")]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn config(&self) -> &DesignConfig {
        &self.config
    }

    /// Designs one pool per query that matches at least one library
    /// construct, in query order. Queries without a match yield nothing.
    ///
    /// Every spec is parsed and resolved before the store is touched. Query
    /// graphs are stored under reserved ids for the duration of the call and
    /// removed again on every path.
    ///
    /// # Errors
    /// `ParameterEmpty` or `InvalidPoolSpec` for malformed specs, `NotFound`
    /// for unknown parts, `Conflict` when a persisted pool id is taken.
    pub fn design_pools<T: AsRef<str>>(&self, specs: &[T]) -> Result<Vec<String>, PoolError> {
        let queries: Vec<ChainLabels> = specs
            .iter()
            .map(|spec| parse_pool_spec(spec.as_ref())?.resolve(self.library))
            .collect::<Result<_, _>>()?;
        if queries.is_empty() {
            return Ok(Vec::new());
        }
        self.check_persist_targets(queries.len())?;

        let mut scratch = Scratch::new(self.store);
        let mut query_ids = Vec::with_capacity(queries.len());
        for (i, labels) in queries.into_iter().enumerate() {
            let space_id = spec_space_id(i);
            self.store
                .create_chain(&space_id, labels.component_ids, labels.component_roles)?;
            scratch.hold(space_id.clone());
            query_ids.push(space_id);
        }

        let queries = Context::load_from(self.store, &query_ids)?;
        let smallest = query_ids
            .iter()
            .filter_map(|id| queries.get(id))
            .map(|q| self.config.candidates.min_size_exclusive(q.node_count()))
            .min()
            .unwrap_or_default();
        let candidate_ids: Vec<String> = self
            .store
            .ids_above_size(smallest)
            .into_iter()
            .filter(|id| !is_reserved(id))
            .collect();
        let candidates = Context::load_from(self.store, &candidate_ids)?;
        if candidates.is_empty() {
            info!("no library construct is large enough to match any query");
        }
        info!(
            "designing {} pools against {} candidate constructs",
            query_ids.len(),
            candidates.len()
        );

        let mut designed: Vec<(usize, DesignSpace)> = Vec::new();
        let mut next_match = 0;
        for (i, query_id) in query_ids.iter().enumerate() {
            let query = queries
                .get(query_id)
                .ok_or_else(|| PoolError::not_found(query_id))?;
            let min_size = self.config.candidates.min_size_exclusive(query.node_count());
            let mut eligible: Vec<(String, &str)> = Vec::new();
            for candidate_id in &candidate_ids {
                if candidates.get(candidate_id).is_some_and(|c| c.node_count() > min_size) {
                    eligible.push((match_space_id(next_match), candidate_id.as_str()));
                    next_match += 1;
                }
            }

            let matches = self.match_candidates(query, &candidates, &eligible);
            scratch.release(query_id);
            info!(
                "query {i}: {} of {} candidates matched",
                matches.len(),
                eligible.len()
            );

            if let Some(pool) = self.consolidate(matches) {
                designed.push((i, pool));
            }
        }
        drop(scratch);

        let pools = designed
            .iter()
            .map(|(_, space)| serialize_pool(space))
            .collect();
        self.persist(designed)?;
        Ok(pools)
    }

    /// Intersects `query` with a copy of each `(match id, candidate id)`
    /// pair; keeps the non-empty results in `eligible` order.
    fn match_candidates(
        &self,
        query: &DesignSpace,
        candidates: &Context,
        eligible: &[(String, &str)],
    ) -> Vec<DesignSpace> {
        let matching = &self.config.matching;
        let run = |(match_id, candidate_id): &(String, &str)| {
            let mut output = candidates.copy_of(candidate_id, match_id.as_str())?;
            merge_design_spaces(&[query], &mut output, matching);
            trace!(
                "matched '{}' against '{}': {} nodes left",
                query.space_id(),
                candidate_id,
                output.node_count()
            );
            (!output.is_empty()).then_some(output)
        };

        #[cfg(feature = "parallel")]
        let matches: Vec<DesignSpace> = if self.parallel {
            use rayon::prelude::*;
            eligible.par_iter().filter_map(run).collect()
        } else {
            eligible.iter().filter_map(run).collect()
        };

        #[cfg(not(feature = "parallel"))]
        let matches: Vec<DesignSpace> = eligible.iter().filter_map(run).collect();

        matches
    }

    /// Orients the matches forward and unions them into the first one.
    fn consolidate(&self, matches: Vec<DesignSpace>) -> Option<DesignSpace> {
        let mut matches = matches.into_iter().map(|mut space| {
            if space.has_reverse_components() {
                space.reverse_complement();
            }
            space
        });
        let mut pool = matches.next()?;
        let rest: Vec<DesignSpace> = matches.collect();
        merge_design_spaces(
            &rest.iter().collect_vec(),
            &mut pool,
            &self.config.consolidation,
        );
        Some(pool)
    }

    fn persist_id(&self, index: usize) -> Option<String> {
        self.config
            .persist_prefix
            .as_ref()
            .map(|prefix| format!("{prefix}{index}"))
    }

    fn check_persist_targets(&self, query_count: usize) -> Result<(), PoolError> {
        for id in (0..query_count).filter_map(|i| self.persist_id(i)) {
            if self.store.contains(&id) {
                return Err(PoolError::conflict(id));
            }
        }
        Ok(())
    }

    fn persist(&self, designed: Vec<(usize, DesignSpace)>) -> Result<(), PoolError> {
        for (i, mut space) in designed {
            if let Some(id) = self.persist_id(i) {
                space.set_space_id(id);
                self.store.save(space)?;
            }
        }
        Ok(())
    }
}
