//! Show command - ASCII view of a map, optionally with a path overlay

use anyhow::Result;
use clap::Args;

use darkemperor_core::{Map, Path, Pathfinder, Point, TerrainRules, TerrainType, Tile};

use crate::map_source::{build_stack, load_map, FeatureArgs, MapArgs, StackArgs};

#[derive(Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub map: MapArgs,

    #[command(flatten)]
    pub stack: StackArgs,

    #[command(flatten)]
    pub features: FeatureArgs,

    /// Path start as X,Y (needs --to)
    #[arg(long, requires = "to")]
    pub from: Option<Point>,

    /// Path destination as X,Y (needs --from)
    #[arg(long, requires = "from")]
    pub to: Option<Point>,
}

pub fn run(args: ShowArgs) -> Result<()> {
    let (map, rules) = load_map(&args.map)?;

    let overlay = plan_overlay(&map, &rules, &args)?;

    print!("{}", render(&map, overlay.as_ref().map(|(f, t, p)| (*f, *t, p))));
    println!();
    println!("{}", legend());
    Ok(())
}

/// Search for the requested path, if any, with the same flags `path` takes
fn plan_overlay(map: &Map, rules: &TerrainRules, args: &ShowArgs) -> Result<Option<(Point, Point, Path)>> {
    let (Some(from), Some(to)) = (args.from, args.to) else {
        return Ok(None);
    };

    let stack = build_stack(&args.stack)?;
    let pathfinder = Pathfinder::new(rules).with_features(args.features.features());
    Ok(Some((from, to, pathfinder.find_path(map, from, to, &stack))))
}

fn terrain_glyph(tile: &Tile) -> char {
    if !tile.not_occupied() {
        return 'u';
    }
    match tile.terrain {
        TerrainType::None => '#',
        TerrainType::City => 'c',
        TerrainType::CapitalCity => 'C',
        TerrainType::Mountain => '^',
        TerrainType::River => '=',
        TerrainType::Coastal => ',',
        TerrainType::Sea => '~',
        TerrainType::Port => 'P',
        TerrainType::HolyPlace => '+',
        TerrainType::Settled => '.',
        TerrainType::MagicHex => '*',
        TerrainType::Battlefield => 'x',
    }
}

fn legend() -> &'static str {
    "# blocked  c city  C capital  ^ mountain  = river  , coast  ~ sea  P port  \
     + holy  . settled  * magic  x battlefield  u units  S/D ends  o path  ? closest"
}

/// Render one line per row. Pointy maps indent odd rows by half a cell.
pub fn render(map: &Map, overlay: Option<(Point, Point, &Path)>) -> String {
    let mut out = String::new();

    for y in 0..map.height() {
        if !map.orientation().is_flat() && y & 1 == 1 {
            out.push(' ');
        }
        for x in 0..map.width() {
            let point = Point::new(x, y);
            let glyph = match overlay {
                Some((from, _, _)) if point == from => 'S',
                Some((_, to, _)) if point == to => 'D',
                Some((_, _, path)) if path.points.contains(&point) => 'o',
                Some((_, _, path)) if path.is_empty() && path.closest == point => '?',
                _ => terrain_glyph(&map[point]),
            };
            out.push(glyph);
            if x + 1 < map.width() {
                out.push(' ');
            }
        }
        out.push('\n');
    }

    out
}
