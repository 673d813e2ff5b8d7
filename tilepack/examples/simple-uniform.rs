use tilepack::{Packer, Rect};

fn main() -> Result<(), tilepack::PackError> {
    env_logger::init();

    let mut packer = Packer::with_segment_length((256.0, 256.0), 64.0)?;

    for index in 0..5 {
        let (id, placement) = packer.append(Rect::sized((128.0, 128.0)), index)?;
        println!("Item {} ({}): {:?}", id, index, placement);
    }

    println!("Free space: {:#?}", packer.free_space());

    Ok(())
}
