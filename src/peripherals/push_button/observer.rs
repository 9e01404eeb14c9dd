use super::event::ButtonEvent;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Sender;

/// Receives every event the dispatcher dequeues.
///
/// Called synchronously from [`Dispatcher::dispatch`](super::Dispatcher::dispatch),
/// in the dispatcher's context, never from the tick context.
pub trait Observer {
    fn on_event(&mut self, is_long: bool, mask: u32);
}

/// No callback registered; events are only returned to the caller.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoObserver;

impl Observer for NoObserver {
    fn on_event(&mut self, _is_long: bool, _mask: u32) {}
}

impl<F> Observer for F
where
    F: FnMut(bool, u32),
{
    fn on_event(&mut self, is_long: bool, mask: u32) {
        self(is_long, mask)
    }
}

/// Forwards events into an embassy channel so an async task can await them.
///
/// # Example
///
/// ```ignore
/// static EVENTS: Channel<CriticalSectionRawMutex, ButtonEvent, 8> = Channel::new();
///
/// let (sampler, dispatcher) = push_button::init(
///     state,
///     buttons,
///     PushButtonConfig::default(),
///     ChannelObserver::new(EVENTS.sender()),
/// )?;
/// ```
pub struct ChannelObserver<'ch, M: RawMutex, const Q: usize> {
    sender: Sender<'ch, M, ButtonEvent, Q>,
}

impl<'ch, M: RawMutex, const Q: usize> ChannelObserver<'ch, M, Q> {
    pub fn new(sender: Sender<'ch, M, ButtonEvent, Q>) -> Self {
        Self { sender }
    }
}

impl<M: RawMutex, const Q: usize> Observer for ChannelObserver<'_, M, Q> {
    fn on_event(&mut self, is_long: bool, mask: u32) {
        let raw = if is_long {
            mask | ButtonEvent::LONG_MASK
        } else {
            mask
        };
        let Some(event) = ButtonEvent::from_raw(raw) else {
            return;
        };
        if self.sender.try_send(event).is_err() {
            warn!("Button event channel full, dropping {}", raw);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use embassy_sync::channel::Channel;

    #[test]
    fn closure_receives_decoded_pair() {
        let mut seen = None;
        {
            let mut observer = |is_long: bool, mask: u32| seen = Some((is_long, mask));
            observer.on_event(true, 0b100);
        }
        assert_eq!(seen, Some((true, 0b100)));
    }

    #[test]
    fn channel_observer_forwards_and_drops_when_full() {
        let channel: Channel<NoopRawMutex, ButtonEvent, 1> = Channel::new();
        let mut observer = ChannelObserver::new(channel.sender());

        observer.on_event(false, 0b001);
        observer.on_event(true, 0b010);

        assert_eq!(channel.try_receive(), Ok(ButtonEvent::short(0)));
        assert!(channel.try_receive().is_err());
    }
}
