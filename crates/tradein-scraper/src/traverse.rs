//! Depth-first enumeration of a brand's selection tree.
//!
//! The tree is discovered live: sibling lists are fetched fresh every time a
//! level is visited, and element handles never outlive the navigation that
//! produced them. Position within a sibling list is the only identity a node
//! has, so progress is tracked as one cursor per level.
//!
//! After every captured leaf, and whenever a level is exhausted, the page is
//! reset to the root and the current cursor prefix is clicked again
//! ("replay"). Committing a condition leaves the page in a state that cannot
//! be backed out of any other way.

use std::time::Duration;

use chrono::NaiveDate;
use tradein_core::{
    AppConfig, BrandProfile, QuoteRecord, SelectionNode, SelectionPath, SiteProfile,
};

use crate::error::{NavError, ScrapeError};
use crate::landing::reset_to_root;
use crate::navigator::Navigator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Bounded wait for every click target and sibling list.
    pub wait: Duration,
    /// Bounded wait for the quoted price after a condition is chosen.
    pub price: Duration,
    /// Pause before each sibling fetch while the page re-renders.
    pub settle: Duration,
}

impl Timeouts {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            wait: config.wait_timeout(),
            price: config.price_timeout(),
            settle: config.settle_delay(),
        }
    }
}

/// Everything one brand traversal needs besides the page itself.
#[derive(Debug, Clone, Copy)]
pub struct TraversalPlan<'a> {
    pub site: &'a SiteProfile,
    pub brand: &'a BrandProfile,
    pub purchase_device_model: &'a str,
    pub selected_model: &'a str,
    /// Stamped on every record of this run.
    pub captured_on: NaiveDate,
    pub timeouts: Timeouts,
}

pub(crate) async fn settle(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// Enumerates every reachable leaf of the plan's tree and captures its price.
///
/// Records come out in depth-first order following on-page sibling order.
/// Failed navigation or read steps abandon the branch they occur in; a leaf
/// whose price cannot be read is skipped.
///
/// # Errors
///
/// Returns [`ScrapeError::Navigation`] only for fatal navigation errors, i.e.
/// when the session itself is no longer usable.
pub async fn enumerate<N: Navigator>(
    nav: &mut N,
    plan: &TraversalPlan<'_>,
) -> Result<Vec<QuoteRecord>, ScrapeError> {
    let depth = plan.brand.depth();
    if depth == 0 {
        return Ok(Vec::new());
    }

    let mut walk = Walk {
        nav,
        plan,
        cursors: vec![0; depth],
        chosen: vec![
            SelectionNode {
                position: 0,
                label: String::new(),
            };
            depth
        ],
        records: Vec::new(),
    };
    walk.run().await?;
    Ok(walk.records)
}

struct Walk<'a, N: Navigator> {
    nav: &'a mut N,
    plan: &'a TraversalPlan<'a>,
    cursors: Vec<usize>,
    /// Option picked at each level on the current path.
    chosen: Vec<SelectionNode>,
    records: Vec<QuoteRecord>,
}

impl<N: Navigator> Walk<'_, N> {
    async fn run(&mut self) -> Result<(), ScrapeError> {
        let leaf = self.cursors.len() - 1;
        let mut level = 0usize;
        self.replay(&mut level).await?;

        loop {
            let siblings = self.siblings(level).await?;
            let cursor = self.cursors[level];

            let Some(element) = siblings.get(cursor) else {
                if level == 0 {
                    break;
                }
                tracing::debug!(
                    field = %self.plan.brand.levels[level].field,
                    count = siblings.len(),
                    "level exhausted"
                );
                self.cursors[level] = 0;
                level -= 1;
                self.cursors[level] += 1;
                self.replay(&mut level).await?;
                continue;
            };

            match self.select(element, cursor).await {
                Ok(node) => self.chosen[level] = node,
                Err(err) if err.is_fatal() => return Err(err.into()),
                Err(err) => {
                    self.dead_end(level, &err);
                    self.cursors[level] += 1;
                    self.replay(&mut level).await?;
                    continue;
                }
            }

            if level < leaf {
                level += 1;
                continue;
            }

            self.capture().await?;
            self.cursors[level] += 1;
            self.replay(&mut level).await?;
        }

        Ok(())
    }

    /// Fetches the current sibling list at `level`. A non-fatal failure
    /// yields an empty list, which the caller treats as exhaustion.
    async fn siblings(&mut self, level: usize) -> Result<Vec<N::Element>, ScrapeError> {
        settle(self.plan.timeouts.settle).await;
        let spec = &self.plan.brand.levels[level];
        match self
            .nav
            .wait_for_all(&spec.locator, self.plan.timeouts.wait)
            .await
        {
            Ok(elements) => {
                tracing::debug!(field = %spec.field, count = elements.len(), "fetched options");
                Ok(elements)
            }
            Err(err) if err.is_fatal() => Err(err.into()),
            Err(err) => {
                tracing::warn!(field = %spec.field, error = %err, "no options found");
                Ok(Vec::new())
            }
        }
    }

    async fn select(
        &mut self,
        element: &N::Element,
        position: usize,
    ) -> Result<SelectionNode, NavError> {
        let label = self.nav.read_text(element).await?;
        self.nav.click(element).await?;
        Ok(SelectionNode {
            position,
            label: label.trim().to_string(),
        })
    }

    fn labels(&self) -> Vec<&str> {
        self.chosen.iter().map(|node| node.label.as_str()).collect()
    }

    /// Reads the displayed price and records the leaf at the current cursors.
    async fn capture(&mut self) -> Result<(), ScrapeError> {
        let read = match self
            .nav
            .wait_until_present(&self.plan.site.price, self.plan.timeouts.price)
            .await
        {
            Ok(element) => self.nav.read_text(&element).await,
            Err(err) => Err(err),
        };

        let raw_price = match read {
            Ok(text) => text.trim().to_string(),
            Err(err) if err.is_fatal() => return Err(err.into()),
            Err(err) => {
                tracing::warn!(
                    path = ?self.labels(),
                    error = %err,
                    "price not shown; skipping leaf"
                );
                return Ok(());
            }
        };

        let path = SelectionPath::from_fields(
            self.plan
                .brand
                .levels
                .iter()
                .map(|spec| spec.field)
                .zip(self.chosen.iter().map(|node| node.label.clone())),
        );
        tracing::debug!(
            path = ?self.labels(),
            positions = ?self.chosen.iter().map(|node| node.position).collect::<Vec<_>>(),
            price = %raw_price,
            "captured quote"
        );

        self.records.push(QuoteRecord {
            captured_on: self.plan.captured_on,
            brand: self.plan.brand.brand,
            path,
            raw_price,
        });
        Ok(())
    }

    /// Resets to the root and re-selects the cursor prefix above `level`.
    ///
    /// When a prefix option can no longer be selected, that branch is
    /// abandoned: its cursor advances, `level` moves up to it, and the replay
    /// restarts from the root.
    async fn replay(&mut self, level: &mut usize) -> Result<(), ScrapeError> {
        'restart: loop {
            reset_to_root(self.nav, self.plan).await?;

            for depth in 0..*level {
                let siblings = self.siblings(depth).await?;
                let cursor = self.cursors[depth];
                let picked = match siblings.get(cursor) {
                    Some(element) => self.nav.click(element).await,
                    None => Err(NavError::NotFound {
                        locator: format!("{} option #{cursor}", self.plan.brand.levels[depth].field),
                    }),
                };

                if let Err(err) = picked {
                    if err.is_fatal() {
                        return Err(err.into());
                    }
                    self.dead_end(depth, &err);
                    self.cursors[depth] += 1;
                    for deeper in &mut self.cursors[depth + 1..] {
                        *deeper = 0;
                    }
                    *level = depth;
                    continue 'restart;
                }
            }

            return Ok(());
        }
    }

    fn dead_end(&self, level: usize, err: &NavError) {
        tracing::warn!(
            brand = %self.plan.brand.brand,
            field = %self.plan.brand.levels[level].field,
            cursor = self.cursors[level],
            error = %err,
            "dead end; abandoning branch"
        );
    }
}
