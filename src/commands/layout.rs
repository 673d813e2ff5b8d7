use crate::{
    board::Board,
    commands::read_board,
    options::{GlobalOptions, LayoutOptions},
};

pub fn layout(global: GlobalOptions, options: LayoutOptions) -> anyhow::Result<()> {
    let config = read_board(&options.board)?;
    let mut board = Board::from_config(&config)?;

    log::trace!(
        "Packed {} tiles onto \"{}\" from {}",
        config.tiles.len(),
        board.name(),
        config.file_path.display()
    );

    if options.relayout {
        board.relayout();
    }

    if options.align {
        board.align()?;
    }

    board.snapshot().write(global.output.as_deref())
}
