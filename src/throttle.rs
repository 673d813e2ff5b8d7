use std::time::Duration;

/// The interval Tiler waits between relocations while a tile is dragged.
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(200);

/// Limits how often pointer moves during a drag turn into relocations.
///
/// A move that arrives at least one interval after the last delivered move is
/// delivered right away. Anything sooner is held back as the pending move,
/// replacing whatever was pending before, and is delivered once an interval
/// has passed since it arrived. Delivering a held-back move does not start a
/// new interval.
///
/// Time is passed in explicitly so recorded gestures can be replayed.
#[derive(Debug, Clone)]
pub struct DragThrottle<P> {
    interval: Duration,
    last_delivered: Option<Duration>,
    pending: Option<Pending<P>>,
}

#[derive(Debug, Clone)]
struct Pending<P> {
    position: P,
    due: Duration,
}

impl<P> DragThrottle<P> {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_delivered: None,
            pending: None,
        }
    }

    /// Hands back the pending move if it has come due by `now`.
    pub fn poll(&mut self, now: Duration) -> Option<P> {
        let due = self
            .pending
            .as_ref()
            .map_or(false, |pending| pending.due <= now);

        if due {
            self.pending.take().map(|pending| pending.position)
        } else {
            None
        }
    }

    /// Records a pointer move at `now`, returning it if it should be acted on
    /// immediately.
    pub fn moved(&mut self, now: Duration, position: P) -> Option<P> {
        let throttled = match self.last_delivered {
            Some(last) => now.saturating_sub(last) < self.interval,
            None => false,
        };

        if throttled {
            self.pending = Some(Pending {
                position,
                due: now + self.interval,
            });

            None
        } else {
            self.pending = None;
            self.last_delivered = Some(now);

            Some(position)
        }
    }

    /// Ends the gesture at `now`. A pending move that's due by then is handed
    /// back, anything later is dropped.
    pub fn release(&mut self, now: Duration) -> Option<P> {
        let delivered = self.poll(now);
        self.pending = None;
        self.last_delivered = None;
        delivered
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn first_move_goes_through() {
        let mut throttle = DragThrottle::new(DEFAULT_THROTTLE);

        assert_eq!(throttle.moved(ms(0), 'a'), Some('a'));
    }

    #[test]
    fn quick_moves_collapse_to_latest() {
        let mut throttle = DragThrottle::new(DEFAULT_THROTTLE);

        assert_eq!(throttle.moved(ms(0), 'a'), Some('a'));
        assert_eq!(throttle.moved(ms(50), 'b'), None);
        assert_eq!(throttle.moved(ms(120), 'c'), None);

        // 'c' came in at 120, so it's due at 320.
        assert_eq!(throttle.poll(ms(300)), None);
        assert_eq!(throttle.poll(ms(320)), Some('c'));
        assert_eq!(throttle.poll(ms(400)), None);
    }

    #[test]
    fn delivering_pending_does_not_restart_interval() {
        let mut throttle = DragThrottle::new(DEFAULT_THROTTLE);

        assert_eq!(throttle.moved(ms(0), 'a'), Some('a'));
        assert_eq!(throttle.moved(ms(10), 'b'), None);
        assert_eq!(throttle.poll(ms(210)), Some('b'));

        // The window is still measured from 'a'.
        assert_eq!(throttle.moved(ms(215), 'c'), Some('c'));
    }

    #[test]
    fn immediate_move_supersedes_pending() {
        let mut throttle = DragThrottle::new(DEFAULT_THROTTLE);

        assert_eq!(throttle.moved(ms(0), 'a'), Some('a'));
        assert_eq!(throttle.moved(ms(150), 'b'), None);
        assert_eq!(throttle.moved(ms(200), 'c'), Some('c'));
        assert_eq!(throttle.poll(ms(350)), None);
    }

    #[test]
    fn release_drops_moves_not_yet_due() {
        let mut throttle = DragThrottle::new(DEFAULT_THROTTLE);

        assert_eq!(throttle.moved(ms(0), 'a'), Some('a'));
        assert_eq!(throttle.moved(ms(100), 'b'), None);
        assert_eq!(throttle.release(ms(250)), None);

        assert_eq!(throttle.moved(ms(260), 'c'), Some('c'));
        assert_eq!(throttle.moved(ms(270), 'd'), None);
        assert_eq!(throttle.release(ms(470)), Some('d'));
    }
}
