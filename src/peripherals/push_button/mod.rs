//! Push-button driver
//!
//! Polls a fixed set of buttons once per tick, times each press and hands
//! short/long press events from the tick context to the application through
//! a lock-free SPSC ring.
//!
//! The shared [`PushButtonState`] lives in a `static` (or a `StaticCell`).
//! [`init`] splits it into a [`Sampler`], driven by the tick source, and a
//! [`Dispatcher`], drained by application code.
//!
//! # Example
//!
//! ```ignore
//! static STATE: StaticCell<PushButtonState<3, 4>> = StaticCell::new();
//!
//! let state = STATE.init(PushButtonState::new());
//! let buttons = [
//!     Button::new(Input::new(p.PIN_13, Pull::Up)),
//!     Button::new(Input::new(p.PIN_14, Pull::Up)),
//!     Button::new(Input::new(p.PIN_15, Pull::Up)),
//! ];
//! let (sampler, mut dispatcher) =
//!     push_button::init(state, buttons, PushButtonConfig::default(), NoObserver)?;
//!
//! spawner.spawn(button_tick_task(sampler).expect("failed to spawn button_tick_task"));
//!
//! loop {
//!     if let Some(event) = dispatcher.dispatch() {
//!         info!("button {} long={}", event.index(), event.is_long());
//!     }
//!     Timer::after_millis(20).await;
//! }
//! ```

mod config;
mod event;
mod observer;
mod queue;
mod timing;

pub use config::*;
pub use event::*;
pub use observer::*;
pub use queue::*;
pub use timing::*;

use crate::ReadLevel;
use embassy_time::{Duration, Ticker};

/// State shared between the tick context and the application context:
/// one press timer per button plus the event ring.
pub struct PushButtonState<const N: usize, const C: usize> {
    timers: [PressTimer; N],
    queue: EventQueue<C>,
}

impl<const N: usize, const C: usize> PushButtonState<N, C> {
    pub const fn new() -> Self {
        const {
            assert!(N > 0, "at least one button is required");
            assert!(N <= MAX_BUTTONS, "too many buttons for the event encoding");
        };
        Self {
            timers: [const { PressTimer::new() }; N],
            queue: EventQueue::new(),
        }
    }

    /// Discard queued events and reset every press timer.
    ///
    /// Not safe against a concurrent tick: only call this before the tick
    /// source starts or while it is paused.
    pub fn clear(&self) {
        for timer in &self.timers {
            timer.reset();
        }
        self.queue.clear();
        debug!("Push-button state cleared");
    }

    pub fn queue(&self) -> &EventQueue<C> {
        &self.queue
    }
}

impl<const N: usize, const C: usize> Default for PushButtonState<N, C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate `config`, reset `state` and split it into the two driver halves.
///
/// `buttons[i]` becomes button `i` (bit `i` of every event mask).
pub fn init<'a, B, O, const N: usize, const C: usize>(
    state: &'a PushButtonState<N, C>,
    buttons: [B; N],
    config: PushButtonConfig,
    observer: O,
) -> Result<(Sampler<'a, B, N, C>, Dispatcher<'a, O, N, C>), ConfigError>
where
    B: ReadLevel,
    O: Observer,
{
    let thresholds = config.thresholds()?;

    state.clear();

    info!(
        "Push buttons initialized: {} buttons, short >= {} ticks, long >= {} ticks, queue {}",
        N,
        thresholds.short_ticks(),
        thresholds.long_ticks(),
        state.queue.capacity(),
    );

    let sampler = Sampler {
        state,
        buttons,
        thresholds,
        interval: config.interval,
    };
    let dispatcher = Dispatcher { state, observer };

    Ok((sampler, dispatcher))
}

/// Producer half: reads the buttons and enqueues classified presses.
pub struct Sampler<'a, B, const N: usize, const C: usize> {
    state: &'a PushButtonState<N, C>,
    buttons: [B; N],
    thresholds: Thresholds,
    interval: Duration,
}

impl<'a, B, const N: usize, const C: usize> Sampler<'a, B, N, C>
where
    B: ReadLevel,
{
    /// Sample every button once.
    ///
    /// Never blocks, so it may be called from a timer interrupt. Runs in
    /// O(N) regardless of how full the queue is.
    pub fn on_tick(&mut self) {
        for (index, (button, timer)) in self
            .buttons
            .iter_mut()
            .zip(&self.state.timers)
            .enumerate()
        {
            let level = button.read_level();
            let Some(press) = timer.sample(level, &self.thresholds) else {
                continue;
            };

            let event = match press {
                Press::Short => ButtonEvent::short(index),
                Press::Long => ButtonEvent::long(index),
            };
            trace!("Button {} released: {}", index, press);
            self.state.queue.push(event);
        }
    }

    /// Tick source: call [`on_tick`](Self::on_tick) every configured interval.
    ///
    /// Spawn a task awaiting this to start sampling.
    pub async fn run(&mut self) -> ! {
        let mut ticker = Ticker::every(self.interval);
        loop {
            ticker.next().await;
            self.on_tick();
        }
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether button `index` is currently being timed as held.
    pub fn is_holding(&self, index: usize) -> bool {
        self.state
            .timers
            .get(index)
            .is_some_and(PressTimer::is_holding)
    }

    /// See [`PushButtonState::clear`].
    pub fn clear(&self) {
        self.state.clear();
    }
}

/// Consumer half: drains events and notifies the observer.
pub struct Dispatcher<'a, O, const N: usize, const C: usize> {
    state: &'a PushButtonState<N, C>,
    observer: O,
}

impl<'a, O, const N: usize, const C: usize> Dispatcher<'a, O, N, C>
where
    O: Observer,
{
    /// Take at most one event off the queue and pass it to the observer.
    pub fn dispatch(&mut self) -> Option<ButtonEvent> {
        let event = self.state.queue.pop()?;
        debug!(
            "Button {} {} press",
            event.index(),
            if event.is_long() { "long" } else { "short" }
        );
        self.observer.on_event(event.is_long(), event.mask());
        Some(event)
    }

    /// Like [`dispatch`](Self::dispatch), returning the raw encoding, `0` if
    /// nothing was queued.
    pub fn dispatch_raw(&mut self) -> u32 {
        self.dispatch().map_or(0, ButtonEvent::raw)
    }

    /// Events waiting to be dispatched.
    pub fn pending(&self) -> usize {
        self.state.queue.len()
    }

    /// Events lost to a full queue since the last clear.
    pub fn dropped(&self) -> u32 {
        self.state.queue.dropped()
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// See [`PushButtonState::clear`].
    pub fn clear(&self) {
        self.state.clear();
    }
}
