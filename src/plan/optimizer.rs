//! Branch-and-bound selection of one run per device.

use std::cmp::{Ordering as CmpOrdering, Reverse};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, instrument, trace, warn};

use crate::devices::{Device, DeviceId};

use super::candidate::{CandidateSchedule, generate_candidates};
use super::power::{self, PowerAggregator};
use super::tariff::{PricingError, RateInterval, evaluate_cost};
use super::types::{Infeasibility, Optimality, Outcome, Schedule, SearchLimits};

/// How many nodes a worker commits between deadline checks.
const DEADLINE_CHECK_INTERVAL: u64 = 256;

/// Costs closer than this are ties, whatever order the sums were taken in.
const COST_TOLERANCE: f64 = 1e-9;

/// Finds the cheapest assignment of runs that keeps every hour under `max_power`.
///
/// Exhaustive and sequential; see [`optimize_with_limits`] for deadlines,
/// node budgets and parallel search.
///
/// # Errors
///
/// Returns a [`PricingError`] if the rate table leaves an hour of some
/// candidate run unpriced.
///
/// # Examples
///
/// ```
/// use appliance_scheduler::devices::Device;
/// use appliance_scheduler::plan::optimizer::optimize;
/// use appliance_scheduler::plan::tariff::RateInterval;
///
/// let devices = vec![Device::new("kettle", "Kettle", 2000.0, 1)];
/// let rates = vec![RateInterval::new(7, 23, 5.0), RateInterval::new(23, 7, 1.0)];
/// let outcome = optimize(&devices, &rates, 2100.0).unwrap();
/// let schedule = outcome.schedule().unwrap();
/// assert_eq!(schedule.total_cost, 2.0);
/// ```
pub fn optimize(
    devices: &[Device],
    rates: &[RateInterval],
    max_power: f64,
) -> Result<Outcome, PricingError> {
    optimize_with_limits(devices, rates, max_power, &SearchLimits::default())
}

/// [`optimize`] with a deadline, node budget and worker count.
///
/// When a limit stops the search, the best schedule found so far is
/// returned as [`Optimality::BestEffort`]. If none was found yet the outcome
/// is [`Infeasibility::SearchBudgetExhausted`].
///
/// # Errors
///
/// Returns a [`PricingError`] if the rate table leaves an hour unpriced.
#[instrument(skip_all, fields(devices = devices.len(), max_power = max_power))]
pub fn optimize_with_limits(
    devices: &[Device],
    rates: &[RateInterval],
    max_power: f64,
    limits: &SearchLimits,
) -> Result<Outcome, PricingError> {
    let started = Instant::now();
    if devices.is_empty() {
        debug!("no devices, nothing to schedule");
        return Ok(Outcome::Scheduled(Schedule::empty()));
    }

    let problem = match Problem::build(devices, rates, max_power)? {
        Ok(problem) => problem,
        Err(reason) => {
            info!(%reason, "infeasible before search");
            return Ok(Outcome::Infeasible(reason));
        }
    };
    info!(
        n_candidates = problem.candidate_count(),
        workers = limits.workers,
        "searching"
    );

    let elapsed = || started.elapsed();
    let shared = SharedBound::new(limits, &elapsed);
    Ok(solve(&problem, &shared, limits.workers))
}

/// Runs the search and turns the best incumbent into an outcome.
fn solve(problem: &Problem<'_>, shared: &SharedBound<'_>, workers: usize) -> Outcome {
    let workers = workers.clamp(1, problem.slots[0].candidates.len());
    let (best, truncated) = if workers == 1 {
        let roots: Vec<usize> = (0..problem.slots[0].candidates.len()).collect();
        let mut search = Search::new(problem, shared);
        search.run(&roots);
        (search.best, search.truncated)
    } else {
        search_in_parallel(problem, shared, workers)
    };

    let nodes_visited = shared.nodes.load(Ordering::Relaxed);
    let Some(best) = best else {
        let reason = if truncated {
            Infeasibility::SearchBudgetExhausted
        } else {
            Infeasibility::PowerCap
        };
        info!(%reason, nodes_visited, elapsed = ?(shared.elapsed)(), "no feasible schedule");
        return Outcome::Infeasible(reason);
    };

    if truncated {
        warn!(nodes_visited, "search stopped early, schedule may not be optimal");
    }
    let schedule = problem.schedule(&best, truncated, nodes_visited);
    info!(
        total_cost = schedule.total_cost,
        nodes_visited,
        elapsed = ?(shared.elapsed)(),
        "optimized"
    );
    Outcome::Scheduled(schedule)
}

/// A candidate with its precomputed cost.
#[derive(Debug)]
struct Priced<'a> {
    candidate: CandidateSchedule<'a>,
    cost: f64,
}

/// One device's position in the search order.
#[derive(Debug)]
struct Slot<'a> {
    device: &'a Device,
    /// Sorted by ascending cost; ties keep window order.
    candidates: Vec<Priced<'a>>,
}

impl Slot<'_> {
    fn order_key(&self) -> (Reverse<u8>, usize, &DeviceId) {
        (
            Reverse(self.device.duration),
            self.candidates.len(),
            &self.device.id,
        )
    }
}

/// Read-only search input shared by all workers.
#[derive(Debug)]
struct Problem<'a> {
    slots: Vec<Slot<'a>>,
    /// `lower_bounds[k]` is the sum of the cheapest run of every slot from `k` on.
    lower_bounds: Vec<f64>,
    max_power: f64,
}

impl<'a> Problem<'a> {
    /// Prices and orders every device's candidates.
    ///
    /// The inner `Err` is an infeasibility that needs no search.
    fn build(
        devices: &'a [Device],
        rates: &[RateInterval],
        max_power: f64,
    ) -> Result<Result<Self, Infeasibility>, PricingError> {
        let mut slots = Vec::with_capacity(devices.len());
        for device in devices {
            let candidates = generate_candidates(device);
            if candidates.is_empty() {
                return Ok(Err(Infeasibility::NoCandidates {
                    device: device.id.clone(),
                }));
            }
            if !power::within_cap(device.power, max_power) {
                return Ok(Err(Infeasibility::DeviceExceedsCap {
                    device: device.id.clone(),
                }));
            }

            let mut priced = candidates
                .into_iter()
                .map(|candidate| {
                    let cost = evaluate_cost(&candidate, rates)?;
                    Ok::<_, PricingError>(Priced { candidate, cost })
                })
                .collect::<Result<Vec<_>, PricingError>>()?;
            priced.sort_by(|a, b| a.cost.total_cmp(&b.cost));
            trace!(device = %device.id, n_candidates = priced.len(), cheapest = priced[0].cost, "priced");
            slots.push(Slot {
                device,
                candidates: priced,
            });
        }

        slots.sort_by(|a, b| a.order_key().cmp(&b.order_key()));

        let mut lower_bounds = vec![0.0; slots.len() + 1];
        for (k, slot) in slots.iter().enumerate().rev() {
            lower_bounds[k] = lower_bounds[k + 1] + slot.candidates[0].cost;
        }

        Ok(Ok(Self {
            slots,
            lower_bounds,
            max_power,
        }))
    }

    fn candidate_count(&self) -> usize {
        self.slots.iter().map(|s| s.candidates.len()).sum()
    }

    fn schedule(&self, best: &Incumbent, truncated: bool, nodes_visited: u64) -> Schedule {
        let mut assignment = BTreeMap::new();
        let mut device_costs = BTreeMap::new();
        for (slot, &index) in self.slots.iter().zip(&best.choice) {
            let priced = &slot.candidates[index];
            assignment.insert(slot.device.id.clone(), priced.candidate.hour_set());
            device_costs.insert(slot.device.id.clone(), priced.cost);
        }
        Schedule {
            assignment,
            device_costs,
            total_cost: best.cost,
            optimality: if truncated {
                Optimality::BestEffort
            } else {
                Optimality::Optimal
            },
            nodes_visited,
        }
    }
}

/// Best complete assignment seen by one worker.
#[derive(Debug, Clone)]
struct Incumbent {
    cost: f64,
    /// Candidate index per slot, in search order.
    choice: Vec<usize>,
}

impl Incumbent {
    /// Cost snapped to the tie grid.
    fn cost_key(&self) -> i64 {
        (self.cost / COST_TOLERANCE).round() as i64
    }

    /// Lower cost first, then the lexicographically first choice.
    ///
    /// Costs are compared on the tie grid so this stays a total order for
    /// any number of near-equal incumbents.
    fn cmp_rank(&self, other: &Self) -> CmpOrdering {
        self.cost_key()
            .cmp(&other.cost_key())
            .then_with(|| self.choice.cmp(&other.choice))
    }
}

/// Elapsed time since the search started.
type Clock<'c> = &'c (dyn Fn() -> Duration + Sync);

/// State shared across workers: the best-cost bound and the limits.
struct SharedBound<'c> {
    /// `f64` bits of the best complete cost found by any worker.
    best_cost: AtomicU64,
    nodes: AtomicU64,
    stopped: AtomicBool,
    node_budget: Option<u64>,
    deadline: Option<Duration>,
    /// Nodes between two reads of `elapsed`.
    check_interval: u64,
    elapsed: Clock<'c>,
}

impl<'c> SharedBound<'c> {
    fn new(limits: &SearchLimits, elapsed: Clock<'c>) -> Self {
        Self {
            best_cost: AtomicU64::new(f64::INFINITY.to_bits()),
            nodes: AtomicU64::new(0),
            stopped: AtomicBool::new(false),
            node_budget: limits.node_budget,
            deadline: limits.deadline,
            check_interval: DEADLINE_CHECK_INTERVAL,
            elapsed,
        }
    }

    fn best_cost(&self) -> f64 {
        f64::from_bits(self.best_cost.load(Ordering::Acquire))
    }

    fn offer(&self, cost: f64) {
        let _ = self
            .best_cost
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                (cost < f64::from_bits(bits)).then_some(cost.to_bits())
            });
    }

    /// Claims one node; returns `false` once a limit has been hit.
    fn claim_node(&self) -> bool {
        if self.stopped.load(Ordering::Relaxed) {
            return false;
        }
        let claimed = self.nodes.fetch_add(1, Ordering::Relaxed);
        let over_budget = self.node_budget.is_some_and(|budget| claimed >= budget);
        let past_deadline = claimed % self.check_interval == 0
            && self.deadline.is_some_and(|d| (self.elapsed)() >= d);
        if over_budget || past_deadline {
            self.nodes.fetch_sub(1, Ordering::Relaxed);
            self.stopped.store(true, Ordering::Relaxed);
            return false;
        }
        true
    }
}

/// One explicit-stack frame: a slot and the next candidate to try.
#[derive(Debug)]
struct Frame {
    slot: usize,
    cursor: usize,
    committed: Option<usize>,
    /// Cost of the runs committed in all frames below this one.
    base_cost: f64,
}

/// Depth-first branch-and-bound over one subset of the root candidates.
struct Search<'p, 'a> {
    problem: &'p Problem<'a>,
    shared: &'p SharedBound<'p>,
    aggregator: PowerAggregator,
    best: Option<Incumbent>,
    truncated: bool,
}

impl<'p, 'a> Search<'p, 'a> {
    fn new(problem: &'p Problem<'a>, shared: &'p SharedBound<'p>) -> Self {
        Self {
            problem,
            shared,
            aggregator: PowerAggregator::new(problem.max_power),
            best: None,
            truncated: false,
        }
    }

    /// Explores every assignment whose first-slot candidate is in `roots`.
    ///
    /// `roots` must be ascending so that cost pruning can stop at the first
    /// dominated candidate.
    fn run(&mut self, roots: &[usize]) {
        let problem = self.problem;
        let depth = problem.slots.len();
        let mut stack = vec![Frame {
            slot: 0,
            cursor: 0,
            committed: None,
            base_cost: 0.0,
        }];

        while let Some(frame) = stack.last_mut() {
            let slot = &problem.slots[frame.slot];
            if let Some(previous) = frame.committed.take() {
                self.aggregator.remove(&slot.candidates[previous].candidate);
            }

            let Some(index) = self.next_feasible(frame, roots) else {
                stack.pop();
                continue;
            };
            if !self.shared.claim_node() {
                self.truncated = true;
                break;
            }

            let priced = &slot.candidates[index];
            self.aggregator.add(&priced.candidate);
            frame.committed = Some(index);
            let cost = frame.base_cost + priced.cost;
            let next_slot = frame.slot + 1;

            if next_slot == depth {
                let choice = stack.iter().filter_map(|f| f.committed).collect();
                self.record(cost, choice);
            } else {
                stack.push(Frame {
                    slot: next_slot,
                    cursor: 0,
                    committed: None,
                    base_cost: cost,
                });
            }
        }
    }

    /// Advances `frame` to its next candidate that is neither dominated by
    /// a known cost nor over the cap.
    fn next_feasible(&self, frame: &mut Frame, roots: &[usize]) -> Option<usize> {
        let slot = &self.problem.slots[frame.slot];
        loop {
            let next = if frame.slot == 0 {
                roots.get(frame.cursor).copied()
            } else {
                (frame.cursor < slot.candidates.len()).then_some(frame.cursor)
            };
            let index = next?;
            frame.cursor += 1;

            let priced = &slot.candidates[index];
            let bound =
                frame.base_cost + priced.cost + self.problem.lower_bounds[frame.slot + 1];
            if self.is_dominated(bound) {
                // Candidates are cost-sorted; the rest are no cheaper.
                return None;
            }
            if self.aggregator.fits(&priced.candidate) {
                return Some(index);
            }
        }
    }

    /// Own incumbent prunes ties too, so the first one found is kept. The
    /// shared bound prunes only strictly worse branches, which keeps the
    /// parallel result identical to the sequential one.
    fn is_dominated(&self, bound: f64) -> bool {
        self.best
            .as_ref()
            .is_some_and(|b| bound >= b.cost - COST_TOLERANCE)
            || bound > self.shared.best_cost() + COST_TOLERANCE
    }

    fn record(&mut self, cost: f64, choice: Vec<usize>) {
        debug!(cost, ?choice, "new incumbent");
        self.shared.offer(cost);
        self.best = Some(Incumbent { cost, choice });
    }
}

/// Deals the first slot's candidates round-robin to `workers` threads.
fn search_in_parallel(
    problem: &Problem<'_>,
    shared: &SharedBound<'_>,
    workers: usize,
) -> (Option<Incumbent>, bool) {
    let n_roots = problem.slots[0].candidates.len();
    let outcomes: Vec<(Option<Incumbent>, bool)> = thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|worker| {
                scope.spawn(move || {
                    let roots: Vec<usize> = (worker..n_roots).step_by(workers).collect();
                    let mut search = Search::new(problem, shared);
                    search.run(&roots);
                    trace!(worker, found = search.best.is_some(), "worker finished");
                    (search.best, search.truncated)
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
            .collect()
    });

    let truncated = outcomes.iter().any(|(_, t)| *t);
    let best = outcomes
        .into_iter()
        .filter_map(|(best, _)| best)
        .min_by(Incumbent::cmp_rank);
    (best, truncated)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use std::collections::BTreeSet;

    use super::*;
    use crate::devices::Hour;
    use crate::plan::report::ScheduleReport;

    fn flat_rates(value: f64) -> Vec<RateInterval> {
        vec![RateInterval::new(0, 24, value)]
    }

    fn two_band_rates() -> Vec<RateInterval> {
        vec![RateInterval::new(7, 23, 5.0), RateInterval::new(23, 7, 1.0)]
    }

    fn hours_of(outcome: &Outcome, id: &str) -> Vec<Hour> {
        outcome
            .schedule()
            .and_then(|s| s.assignment.get(&DeviceId::from(id)))
            .map(|h| h.iter().copied().collect())
            .unwrap_or_default()
    }

    #[test]
    fn empty_household_is_free() {
        let outcome = optimize(&[], &two_band_rates(), 1000.0).unwrap();
        let schedule = outcome.schedule().unwrap();
        assert!(schedule.assignment.is_empty());
        assert_eq!(schedule.total_cost, 0.0);
    }

    #[test]
    fn single_device_takes_cheapest_run() {
        let devices = vec![Device::new("kettle", "Kettle", 1000.0, 2)];
        let outcome = optimize(&devices, &two_band_rates(), 2000.0).unwrap();
        // Cheapest window in numeric order is 0-1.
        assert_eq!(hours_of(&outcome, "kettle"), vec![0, 1]);
        assert_relative_eq!(outcome.schedule().unwrap().total_cost, 2.0);
    }

    #[test]
    fn cap_pushes_second_device_to_pricier_hours() {
        let devices = vec![
            Device::new("a", "A", 1000.0, 8),
            Device::new("b", "B", 1000.0, 8),
        ];
        let outcome = optimize(&devices, &two_band_rates(), 1500.0).unwrap();
        let schedule = outcome.schedule().unwrap();
        let a: BTreeSet<Hour> = schedule.assignment[&DeviceId::from("a")].clone();
        let b: BTreeSet<Hour> = schedule.assignment[&DeviceId::from("b")].clone();
        assert!(a.is_disjoint(&b));
        assert_eq!(schedule.optimality, Optimality::Optimal);
    }

    #[test]
    fn over_long_device_is_infeasible() {
        let devices = vec![
            Device::new("ok", "Ok", 10.0, 1),
            Device::new("dryer", "Dryer", 100.0, 11).with_mode("night"),
        ];
        let outcome = optimize(&devices, &two_band_rates(), 1000.0).unwrap();
        assert_eq!(
            outcome,
            Outcome::Infeasible(Infeasibility::NoCandidates {
                device: DeviceId::from("dryer")
            })
        );
    }

    #[test]
    fn device_above_cap_is_reported() {
        let devices = vec![Device::new("heater", "Heater", 3000.0, 1)];
        let outcome = optimize(&devices, &two_band_rates(), 2000.0).unwrap();
        assert_eq!(
            outcome,
            Outcome::Infeasible(Infeasibility::DeviceExceedsCap {
                device: DeviceId::from("heater")
            })
        );
    }

    #[test]
    fn unsatisfiable_cap_is_infeasible() {
        let devices = vec![
            Device::new("a", "A", 600.0, 24),
            Device::new("b", "B", 600.0, 1),
        ];
        let outcome = optimize(&devices, &two_band_rates(), 1000.0).unwrap();
        assert_eq!(outcome, Outcome::Infeasible(Infeasibility::PowerCap));
    }

    #[test]
    fn pricing_gap_is_an_error() {
        let devices = vec![Device::new("a", "A", 100.0, 1)];
        let rates = vec![RateInterval::new(0, 12, 1.0)];
        let err = optimize(&devices, &rates, 1000.0).unwrap_err();
        assert_eq!(err, PricingError::Uncovered { hour: 12 });
    }

    #[test]
    fn ties_resolve_to_first_window_position() {
        let devices = vec![Device::new("lamp", "Lamp", 10.0, 3)];
        let outcome = optimize(&devices, &flat_rates(1.0), 100.0).unwrap();
        assert_eq!(hours_of(&outcome, "lamp"), vec![0, 1, 2]);
    }

    #[test]
    fn longest_device_is_ordered_first() {
        let short = Device::new("short", "Short", 1.0, 1);
        let long = Device::new("long", "Long", 1.0, 5);
        let devices = [short, long];
        let problem = Problem::build(&devices, &flat_rates(1.0), 10.0)
            .unwrap()
            .unwrap();
        assert_eq!(problem.slots[0].device.id, DeviceId::from("long"));
        assert_relative_eq!(problem.lower_bounds[0], 0.006, epsilon = 1e-12);
        assert_eq!(problem.lower_bounds[2], 0.0);
    }

    #[test]
    fn zero_budget_finds_nothing() {
        let devices = vec![Device::new("a", "A", 100.0, 1)];
        let limits = SearchLimits::default().with_node_budget(0);
        let outcome = optimize_with_limits(&devices, &flat_rates(1.0), 1000.0, &limits).unwrap();
        assert_eq!(
            outcome,
            Outcome::Infeasible(Infeasibility::SearchBudgetExhausted)
        );
    }

    #[test]
    fn zero_deadline_finds_nothing() {
        let devices = vec![
            Device::new("a", "A", 100.0, 1),
            Device::new("b", "B", 100.0, 2),
        ];
        let limits = SearchLimits::default().with_deadline(Duration::ZERO);
        let outcome = optimize_with_limits(&devices, &flat_rates(1.0), 1000.0, &limits).unwrap();
        assert_eq!(
            outcome,
            Outcome::Infeasible(Infeasibility::SearchBudgetExhausted)
        );
    }

    #[test]
    fn fractional_powers_fit_exactly_at_the_cap() {
        let rates = vec![RateInterval::new(0, 1, 1.0), RateInterval::new(1, 0, 2.0)];
        let base = Device::new("x", "Base", 0.1, 24);
        let small = Device::new("y", "Small", 0.4, 1);
        let large = Device::new("z", "Large", 1.3, 1);

        let with_small = [base.clone(), small, large.clone()];
        let outcome = optimize(&with_small, &rates, 1.4).unwrap();
        assert_eq!(hours_of(&outcome, "z"), vec![0]);
        assert_eq!(hours_of(&outcome, "y"), vec![1]);
        let schedule = outcome.schedule().unwrap();
        let report = ScheduleReport::from_schedule(&with_small, &rates, schedule, 1.4);
        assert!(report.within_cap());

        let without_small = [base, large];
        let outcome = optimize(&without_small, &rates, 1.4).unwrap();
        assert!(outcome.is_feasible());
        assert_eq!(hours_of(&outcome, "z"), vec![0]);
    }

    #[test]
    fn incumbent_ranking_is_a_total_order() {
        let a = Incumbent { cost: 1.0, choice: vec![2] };
        let b = Incumbent { cost: 1.0 + 0.6e-9, choice: vec![1] };
        let c = Incumbent { cost: 1.0 + 1.2e-9, choice: vec![0] };
        let orders = [
            [&a, &b, &c],
            [&a, &c, &b],
            [&b, &a, &c],
            [&b, &c, &a],
            [&c, &a, &b],
            [&c, &b, &a],
        ];
        for order in orders {
            let best = order.into_iter().min_by(|x, y| x.cmp_rank(y)).unwrap();
            assert_eq!(best.choice, vec![2]);
        }
    }

    /// The first leaf puts `wide` on the two cheapest hours; moving it one
    /// hour later frees hour 0 for `heavy` and is cheaper overall.
    fn first_leaf_is_suboptimal() -> (Vec<Device>, Vec<RateInterval>) {
        let devices = vec![
            Device::new("wide", "Wide", 1000.0, 2),
            Device::new("heavy", "Heavy", 2000.0, 1),
        ];
        let rates = vec![
            RateInterval::new(0, 2, 1.0),
            RateInterval::new(2, 3, 1.2),
            RateInterval::new(3, 0, 5.0),
        ];
        (devices, rates)
    }

    #[test]
    fn backtracking_beats_the_first_leaf() {
        let (devices, rates) = first_leaf_is_suboptimal();
        let outcome = optimize(&devices, &rates, 2500.0).unwrap();
        assert_eq!(hours_of(&outcome, "wide"), vec![1, 2]);
        assert_eq!(hours_of(&outcome, "heavy"), vec![0]);
        assert_relative_eq!(outcome.schedule().unwrap().total_cost, 4.2, epsilon = 1e-12);
    }

    #[test]
    fn small_budget_returns_best_effort() {
        let (devices, rates) = first_leaf_is_suboptimal();
        let limits = SearchLimits::default().with_node_budget(2);
        let outcome = optimize_with_limits(&devices, &rates, 2500.0, &limits).unwrap();
        let schedule = outcome.schedule().unwrap();
        assert_eq!(schedule.optimality, Optimality::BestEffort);
        assert_eq!(hours_of(&outcome, "wide"), vec![0, 1]);
        assert_eq!(hours_of(&outcome, "heavy"), vec![2]);
        assert_relative_eq!(schedule.total_cost, 4.4, epsilon = 1e-12);
        assert_eq!(schedule.nodes_visited, 2);
    }

    #[test]
    fn deadline_after_first_leaf_returns_best_effort() {
        let (devices, rates) = first_leaf_is_suboptimal();
        let problem = Problem::build(&devices, &rates, 2500.0).unwrap().unwrap();
        // Every read of the clock advances it by 10 ms; the third read is late.
        let ticks = AtomicU64::new(0);
        let clock = || Duration::from_millis(10 * ticks.fetch_add(1, Ordering::Relaxed));
        let limits = SearchLimits::default().with_deadline(Duration::from_millis(15));
        let mut shared = SharedBound::new(&limits, &clock);
        shared.check_interval = 1;

        let outcome = solve(&problem, &shared, 1);
        let schedule = outcome.schedule().unwrap();
        assert_eq!(schedule.optimality, Optimality::BestEffort);
        assert_eq!(hours_of(&outcome, "wide"), vec![0, 1]);
        assert_eq!(hours_of(&outcome, "heavy"), vec![2]);
        assert_eq!(schedule.nodes_visited, 2);
    }

    #[test]
    fn parallel_matches_sequential() {
        let devices = vec![
            Device::new("dw", "Dishwasher", 950.0, 3).with_mode("night"),
            Device::new("oven", "Oven", 2000.0, 2).with_mode("day"),
            Device::new("ac", "Air conditioner", 850.0, 1),
            Device::new("wm", "Washer", 700.0, 2),
        ];
        let sequential = optimize(&devices, &two_band_rates(), 2100.0).unwrap();
        let limits = SearchLimits::default().with_workers(3);
        let parallel =
            optimize_with_limits(&devices, &two_band_rates(), 2100.0, &limits).unwrap();
        let (s, p) = (sequential.schedule().unwrap(), parallel.schedule().unwrap());
        assert_eq!(s.assignment, p.assignment);
        assert_eq!(s.total_cost, p.total_cost);
        assert_eq!(p.optimality, Optimality::Optimal);
    }
}
