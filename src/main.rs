//! Generates a connected cave map and prints it to stdout.

use anyhow::Error;
use cellular_mapgen::generator::CellularGenerator;
use cellular_mapgen::grid::{CellValue, Point};
use cellular_mapgen::options::CellularOptions;

fn main() -> Result<(), Error> {
    let mut rng = rand::thread_rng();

    let options = CellularOptions {
        connected: true,
        ..Default::default()
    };
    let mut generator = CellularGenerator::new(60, 30, options)?;
    generator.randomize(&mut rng, 0.5);
    for _ in 0..4 {
        generator.create(&mut rng, None);
    }

    let grid = generator.grid();
    for y in 0..grid.height() {
        let mut row = String::with_capacity(grid.width());
        for x in 0..grid.width() {
            row.push(match grid.at(&Point::new(x as i32, y as i32)) {
                Some(CellValue::Alive) => '#',
                _ => '.',
            });
        }
        println!("{row}");
    }
    if let Some(start) = generator.start() {
        println!("start: ({}, {})", start.x, start.y);
    }

    Ok(())
}
