use std::{rc::Rc, time::Duration};

use anyhow::Context;
use tilepack::{MetricsSink, StepCounter};

use crate::{
    board::{self, Board},
    commands::read_board,
    data::DragTrace,
    options::{DragOptions, GlobalOptions},
    throttle::DragThrottle,
};

pub fn drag(global: GlobalOptions, options: DragOptions) -> anyhow::Result<()> {
    let config = read_board(&options.board)?;
    let trace = DragTrace::read_from_file(&options.trace).context("Could not read drag trace")?;

    let mut board = Board::from_config(&config)?;

    let counter = Rc::new(StepCounter::new());
    board
        .packer_mut()
        .set_metrics(Some(counter.clone() as Rc<dyn MetricsSink>));

    let interval = options.throttle();
    let summary = replay(&mut board, &trace, interval)?;

    log::info!(
        "Replayed {} pointer moves from {} on {} as {} relocations",
        summary.moves,
        trace.file_path.display(),
        trace.tile,
        summary.relocations
    );
    log::debug!("Relocating took {} steps", counter.total());

    board.snapshot().write(global.output.as_deref())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    pub moves: usize,
    pub relocations: usize,
}

/// Plays a recorded gesture back against `board`, relocating the dragged tile
/// whenever the throttle lets a pointer move through.
pub fn replay(
    board: &mut Board,
    trace: &DragTrace,
    interval: Duration,
) -> Result<ReplaySummary, board::Error> {
    // Fail before any moves if the tile doesn't exist.
    board.id_of(&trace.tile)?;

    let mut moves = trace.moves.clone();
    moves.sort_by_key(|movement| movement.at_ms);

    let mut throttle = DragThrottle::new(interval);
    let mut relocations = 0;

    for movement in &moves {
        let now = movement.at();

        let overdue = throttle.poll(now);
        let immediate = throttle.moved(now, movement.pointer);

        for pointer in overdue.into_iter().chain(immediate) {
            let _ = board.drag(&trace.tile, pointer)?;
            relocations += 1;
        }
    }

    if let Some(pointer) = throttle.release(trace.release_at(interval)) {
        let _ = board.drag(&trace.tile, pointer)?;
        relocations += 1;
    }

    Ok(ReplaySummary {
        moves: moves.len(),
        relocations,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::data::BoardConfig;

    fn gallery() -> Board {
        let config = BoardConfig::from_toml(
            r#"
            name = "gallery"
            size = [1800, 15000]
            segment-length = 80

            [[tiles]]
            name = "a"
            size = [200, 100]

            [[tiles]]
            name = "b"
            size = [200, 100]

            [[tiles]]
            name = "c"
            size = [200, 100]
            "#,
        )
        .unwrap();

        Board::from_config(&config).unwrap()
    }

    fn trace(source: &str) -> DragTrace {
        DragTrace::from_toml(source).unwrap()
    }

    fn position_of(board: &Board, name: &str) -> (f64, f64) {
        board
            .snapshot()
            .tiles
            .into_iter()
            .find(|tile| tile.name.as_ref() == name)
            .map(|tile| tile.position)
            .unwrap()
    }

    #[test]
    fn last_held_back_move_is_delivered_on_release() {
        let mut board = gallery();
        let trace = trace(
            r#"
            tile = "b"

            [[moves]]
            at-ms = 0
            pointer = [900, 0]

            [[moves]]
            at-ms = 50
            pointer = [0, 5000]
            "#,
        );

        let summary = replay(&mut board, &trace, Duration::from_millis(200)).unwrap();

        assert_eq!(
            summary,
            ReplaySummary {
                moves: 2,
                relocations: 2,
            }
        );
        assert_eq!(position_of(&board, "b"), (0.0, 100.0));
        assert_eq!(position_of(&board, "a"), (0.0, 0.0));
        assert_eq!(position_of(&board, "c"), (400.0, 0.0));
    }

    #[test]
    fn early_release_drops_held_back_move() {
        let mut board = gallery();
        let trace = trace(
            r#"
            tile = "b"
            release-at-ms = 100

            [[moves]]
            at-ms = 0
            pointer = [900, 0]

            [[moves]]
            at-ms = 50
            pointer = [0, 5000]
            "#,
        );

        let summary = replay(&mut board, &trace, Duration::from_millis(200)).unwrap();

        assert_eq!(summary.relocations, 1);
        assert_eq!(position_of(&board, "b"), (880.0, 0.0));
    }

    #[test]
    fn unknown_tile_fails_before_moving_anything() {
        let mut board = gallery();
        let trace = trace(
            r#"
            tile = "nope"

            [[moves]]
            at-ms = 0
            pointer = [900, 0]
            "#,
        );

        let result = replay(&mut board, &trace, Duration::from_millis(200));

        assert!(matches!(result, Err(board::Error::UnknownTile(_))));
        assert_eq!(position_of(&board, "b"), (200.0, 0.0));
    }
}
