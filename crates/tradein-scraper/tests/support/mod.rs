//! In-memory stand-in for the trade-in page.
//!
//! The fake renders one level of options at a time, exactly like the real
//! flow: options of level `k` are visible once `k` options have been chosen,
//! the price appears once the last level is chosen, and after that nothing
//! else can be selected until the page is reopened. Every `open` bumps a
//! generation counter; handles from an older generation are rejected as
//! stale.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use chrono::NaiveDate;
use tradein_core::{Brand, BrandProfile, LevelSpec, Locator, PathField, SiteProfile};
use tradein_scraper::{NavError, Navigator, Timeouts, TraversalPlan};

pub const PURCHASE_MODEL: &str = "Galaxy Z Fold4 5G | Flip4 5G";
pub const SELECTED_MODEL: &str = "Galaxy Z Fold4 5G";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Preamble,
    Option { level: usize, index: usize },
    Price,
}

#[derive(Debug, Clone)]
pub struct FakeElement {
    generation: u64,
    kind: Kind,
}

type ChildCount = Box<dyn Fn(&[usize]) -> usize>;

pub struct FakeSite {
    level_locators: Vec<Locator>,
    price_locator: Locator,
    children: ChildCount,
    generation: u64,
    selected: Vec<usize>,
    committed: bool,
    /// Paths whose option never becomes clickable.
    dead: HashSet<Vec<usize>>,
    /// Leaves whose price never appears.
    no_price: HashSet<Vec<usize>>,
    /// Paths whose option stops being clickable once `opens` reaches the value.
    vanish_from_open: HashMap<Vec<usize>, usize>,
    /// The session dies on this open.
    lose_session_on_open: Option<usize>,
    pub opens: usize,
    pub stale_uses: usize,
}

impl FakeSite {
    /// A tree with the same number of options under every parent at a level.
    pub fn uniform(site: &SiteProfile, brand: Brand, counts: Vec<usize>) -> Self {
        Self::with_children(site, brand, move |prefix: &[usize]| {
            counts.get(prefix.len()).copied().unwrap_or(0)
        })
    }

    pub fn with_children(
        site: &SiteProfile,
        brand: Brand,
        children: impl Fn(&[usize]) -> usize + 'static,
    ) -> Self {
        let profile = site.brand(brand).expect("brand in profile");
        Self {
            level_locators: profile.levels.iter().map(|l| l.locator.clone()).collect(),
            price_locator: site.price.clone(),
            children: Box::new(children),
            generation: 0,
            selected: Vec::new(),
            committed: false,
            dead: HashSet::new(),
            no_price: HashSet::new(),
            vanish_from_open: HashMap::new(),
            lose_session_on_open: None,
            opens: 0,
            stale_uses: 0,
        }
    }

    pub fn dead(mut self, path: &[usize]) -> Self {
        self.dead.insert(path.to_vec());
        self
    }

    pub fn without_price(mut self, path: &[usize]) -> Self {
        self.no_price.insert(path.to_vec());
        self
    }

    pub fn vanishing_from_open(mut self, path: &[usize], open: usize) -> Self {
        self.vanish_from_open.insert(path.to_vec(), open);
        self
    }

    pub fn losing_session_on_open(mut self, open: usize) -> Self {
        self.lose_session_on_open = Some(open);
        self
    }

    /// Label rendered for option `index` under `prefix`, e.g. `"L2:0.1.3"`.
    pub fn label(prefix: &[usize], index: usize) -> String {
        let mut parts: Vec<String> = prefix.iter().map(ToString::to_string).collect();
        parts.push(index.to_string());
        format!("L{}:{}", prefix.len(), parts.join("."))
    }

    /// Price shown for a full path, with a thousands separator.
    pub fn price_text(path: &[usize]) -> String {
        let amount: usize = 950
            + path
                .iter()
                .enumerate()
                .map(|(level, index)| (level + 1) * (index + 1) * 7)
                .sum::<usize>();
        let thousands = amount / 1000;
        if thousands > 0 {
            format!("{thousands},{:03} AED", amount % 1000)
        } else {
            format!("{amount} AED")
        }
    }

    fn depth(&self) -> usize {
        self.level_locators.len()
    }

    fn element(&self, kind: Kind) -> FakeElement {
        FakeElement {
            generation: self.generation,
            kind,
        }
    }

    fn check_fresh(&mut self, element: &FakeElement) -> Result<(), NavError> {
        if element.generation == self.generation {
            Ok(())
        } else {
            self.stale_uses += 1;
            Err(NavError::StaleElement)
        }
    }

    fn timeout(locator: &Locator, timeout: Duration) -> NavError {
        NavError::Timeout {
            locator: locator.to_string(),
            timeout_secs: timeout.as_secs(),
        }
    }

    fn is_level_locator(&self, locator: &Locator) -> bool {
        self.level_locators.contains(locator)
    }

    fn find_one(&self, locator: &Locator, timeout: Duration) -> Result<FakeElement, NavError> {
        if *locator == self.price_locator {
            if self.committed && !self.no_price.contains(&self.selected) {
                return Ok(self.element(Kind::Price));
            }
            return Err(Self::timeout(locator, timeout));
        }
        if self.is_level_locator(locator) {
            return self
                .visible_options(locator)
                .into_iter()
                .next()
                .ok_or_else(|| Self::timeout(locator, timeout));
        }
        Ok(self.element(Kind::Preamble))
    }

    fn visible_options(&self, locator: &Locator) -> Vec<FakeElement> {
        let level = self.selected.len();
        if self.committed
            || level >= self.depth()
            || self.level_locators[level] != *locator
        {
            return Vec::new();
        }
        let count = (self.children)(&self.selected);
        (0..count)
            .map(|index| self.element(Kind::Option { level, index }))
            .collect()
    }
}

impl Navigator for FakeSite {
    type Element = FakeElement;

    async fn open(&mut self, _url: &str) -> Result<(), NavError> {
        self.opens += 1;
        if self.lose_session_on_open == Some(self.opens) {
            return Err(NavError::SessionLost("browser crashed".to_string()));
        }
        self.generation += 1;
        self.selected.clear();
        self.committed = false;
        Ok(())
    }

    async fn click(&mut self, element: &FakeElement) -> Result<(), NavError> {
        self.check_fresh(element)?;
        let Kind::Option { level, index } = element.kind else {
            return Ok(());
        };
        if self.committed || level != self.selected.len() {
            return Err(NavError::StaleElement);
        }

        let mut path = self.selected.clone();
        path.push(index);
        let vanished = self
            .vanish_from_open
            .get(&path)
            .is_some_and(|&from| self.opens >= from);
        if self.dead.contains(&path) || vanished {
            return Err(NavError::Timeout {
                locator: Self::label(&self.selected, index),
                timeout_secs: 20,
            });
        }

        self.selected = path;
        if self.selected.len() == self.depth() {
            self.committed = true;
        }
        Ok(())
    }

    async fn wait_until_clickable(
        &mut self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<FakeElement, NavError> {
        self.find_one(locator, timeout)
    }

    async fn wait_until_present(
        &mut self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<FakeElement, NavError> {
        self.find_one(locator, timeout)
    }

    async fn wait_for_all(
        &mut self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<Vec<FakeElement>, NavError> {
        let options = self.visible_options(locator);
        if options.is_empty() {
            return Err(Self::timeout(locator, timeout));
        }
        Ok(options)
    }

    async fn read_text(&mut self, element: &FakeElement) -> Result<String, NavError> {
        self.check_fresh(element)?;
        match element.kind {
            Kind::Option { level, index } => Ok(format!(
                "  {}  ",
                Self::label(&self.selected[..level], index)
            )),
            Kind::Price => Ok(Self::price_text(&self.selected)),
            Kind::Preamble => Ok(String::new()),
        }
    }
}

fn level(field: PathField, class: &str) -> LevelSpec {
    LevelSpec {
        field,
        locator: Locator::ClassName(class.to_string()),
    }
}

/// Site profile shaped like the real one: a five-level Samsung tree and a
/// three-level Apple tree, with the middle levels sharing one tile class.
pub fn site_profile() -> SiteProfile {
    SiteProfile {
        start_url: "https://tradein.example.com/#start-evaluation".to_string(),
        category_label: "Mobile Phones".to_string(),
        category_tile: Locator::ClassName("custom-category-item".to_string()),
        price: Locator::Css("[class*='md:nl-widget-text-right']".to_string()),
        brands: vec![
            BrandProfile {
                brand: Brand::Samsung,
                logo_src: "https://cdn.example.com/samsung.png".to_string(),
                levels: vec![
                    level(PathField::SeriesName, "custom-model-item"),
                    level(PathField::Series, "custom-dynamic-tile-item"),
                    level(PathField::Model, "custom-dynamic-tile-item"),
                    level(PathField::Storage, "custom-dynamic-tile-item"),
                    level(PathField::Condition, "custom-store-drop-off-item"),
                ],
            },
            BrandProfile {
                brand: Brand::Apple,
                logo_src: "https://cdn.example.com/apple.jpeg".to_string(),
                levels: vec![
                    level(PathField::Model, "custom-model-item"),
                    level(PathField::Storage, "custom-dynamic-tile-item"),
                    level(PathField::Condition, "custom-store-drop-off-item"),
                ],
            },
        ],
    }
}

pub fn capture_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 27).expect("valid date")
}

pub fn plan(site: &SiteProfile, brand: Brand) -> TraversalPlan<'_> {
    TraversalPlan {
        site,
        brand: site.brand(brand).expect("brand in profile"),
        purchase_device_model: PURCHASE_MODEL,
        selected_model: SELECTED_MODEL,
        captured_on: capture_date(),
        timeouts: Timeouts {
            wait: Duration::from_secs(20),
            price: Duration::from_secs(5),
            settle: Duration::ZERO,
        },
    }
}
