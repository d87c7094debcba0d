//! Procedural board generation
//!
//! A board is built in three passes:
//! 1. Shape the arena for the chosen [`BoardStyle`] (border gaps, ellipse,
//!    maze segments or blobs).
//! 2. Guarantee every edge has an opening, mirrored on the opposite edge so
//!    wrap-around travel lands in free space. Circular arenas also get a short
//!    corridor cut inward from each opening.
//! 3. Scatter secondary obstacles from a sequence seeded by the style, so
//!    every board of one style shares the same obstacle pattern.
//!
//! Generation never fails. Very small dimensions produce degenerate boards.

use rand::Rng;
use tracing::debug;

use super::board::{Board, BoardStyle, Cell};
use super::seeded::SeededSequence;

/// Chance that a perimeter position of a gapped border stays open
const BORDER_GAP_CHANCE: f64 = 0.2;

/// Fraction of the board used for the circular arena's semi-axes
const ARENA_RADIUS_RATIO: f64 = 0.45;

/// Spacing of maze segment anchors
const MAZE_SPACING: usize = 8;

/// Blob centers stay at least this far from every edge
const BLOB_EDGE_MARGIN: usize = 3;

/// Cells cleared inward from a circular arena opening
const WRAP_CORRIDOR_DEPTH: usize = 4;

const SECTORS_X: usize = 8;
const SECTORS_Y: usize = 5;

/// Obstacles are never placed within this distance of the center
const SPAWN_CLEARANCE: f64 = 6.0;

/// Below this share of the target the random top-up pass runs
const TOP_UP_THRESHOLD: f64 = 0.8;

/// Top-up attempts granted per missing obstacle
const TOP_UP_ATTEMPTS_PER_MISSING: usize = 10;

/// Step of the final sweep as a share of the board area, bumped until it is
/// coprime with the area so every cell is visited once
const SWEEP_STRIDE_RATIO: f64 = 0.618;

/// Generate a board using the thread-local random source.
///
/// When `forced_style` is `None` the style is drawn uniformly from
/// [`BoardStyle::ALL`].
pub fn generate(
    width: usize,
    height: usize,
    forced_style: Option<BoardStyle>,
) -> (Board, BoardStyle) {
    generate_with_rng(&mut rand::thread_rng(), width, height, forced_style)
}

/// Generate a board drawing all arena randomness from `rng`.
///
/// Obstacle scattering does not touch `rng`; it depends only on the style.
pub fn generate_with_rng<R: Rng + ?Sized>(
    rng: &mut R,
    width: usize,
    height: usize,
    forced_style: Option<BoardStyle>,
) -> (Board, BoardStyle) {
    let style = forced_style
        .unwrap_or_else(|| BoardStyle::ALL[rng.gen_range(0..BoardStyle::ALL.len())]);

    let mut board = Board::new(width, height);
    if width == 0 || height == 0 {
        return (board, style);
    }

    match style {
        BoardStyle::GappedBorder => shape_gapped_border(&mut board, rng),
        BoardStyle::Circular => shape_circular(&mut board),
        BoardStyle::Maze => shape_maze(&mut board, rng),
        BoardStyle::Blob => shape_blobs(&mut board, rng),
    }

    ensure_gaps(&mut board);
    if style == BoardStyle::Circular {
        clear_wrap_corridors(&mut board);
    }

    let placed = scatter_obstacles(&mut board, style);

    debug!(
        style = %style,
        width,
        height,
        walls = board.count(Cell::Wall),
        obstacles = placed,
        "generated board"
    );

    (board, style)
}

/// Number of obstacles a board of this style and size aims for
pub fn obstacle_target(style: BoardStyle, width: usize, height: usize) -> usize {
    ((width * height) as f64 * style.obstacle_density()).floor() as usize
}

fn shape_gapped_border<R: Rng + ?Sized>(board: &mut Board, rng: &mut R) {
    let (width, height) = (board.width(), board.height());

    // Corners sit on both a row and a column, so they stay closed.
    for x in 1..width.saturating_sub(1) {
        if !rng.gen_bool(BORDER_GAP_CHANCE) {
            board.set(x, 0, Cell::Wall);
            board.set(x, height - 1, Cell::Wall);
        }
    }
    for y in 1..height.saturating_sub(1) {
        if !rng.gen_bool(BORDER_GAP_CHANCE) {
            board.set(0, y, Cell::Wall);
            board.set(width - 1, y, Cell::Wall);
        }
    }
    for (x, y) in [(0, 0), (width - 1, 0), (0, height - 1), (width - 1, height - 1)] {
        board.set(x, y, Cell::Wall);
    }
}

fn shape_circular(board: &mut Board) {
    let (width, height) = (board.width(), board.height());
    let (center_x, center_y) = board.center();
    let radius_x = (width as f64 * ARENA_RADIUS_RATIO).floor();
    let radius_y = (height as f64 * ARENA_RADIUS_RATIO).floor();

    for y in 0..height {
        for x in 0..width {
            let dx = (x as f64 - center_x as f64) / radius_x;
            let dy = (y as f64 - center_y as f64) / radius_y;
            // A zero radius yields NaN or infinity; both count as outside.
            let distance = dx * dx + dy * dy;
            if distance > 1.0 || distance.is_nan() {
                board.set(x, y, Cell::Wall);
            }
        }
    }
}

fn shape_maze<R: Rng + ?Sized>(board: &mut Board, rng: &mut R) {
    let (width, height) = (board.width(), board.height());

    for y in (0..height).step_by(MAZE_SPACING) {
        for x in (0..width).step_by(MAZE_SPACING) {
            let length = rng.gen_range(3..=5);
            let horizontal = rng.gen_bool(0.5);

            // A segment lying along an edge would seal the wrap-around path.
            if horizontal && (y == 0 || y == height - 1) {
                continue;
            }
            if !horizontal && (x == 0 || x == width - 1) {
                continue;
            }

            for i in 0..length {
                let (nx, ny) = if horizontal { (x + i, y) } else { (x, y + i) };
                board.set(nx, ny, Cell::Wall);
            }
        }
    }
}

/// Edge cells blocked by blob spill-over, indexed by x (rows) or y (columns)
struct BlockedEdges {
    top: Vec<bool>,
    bottom: Vec<bool>,
    left: Vec<bool>,
    right: Vec<bool>,
}

fn shape_blobs<R: Rng + ?Sized>(board: &mut Board, rng: &mut R) {
    let (width, height) = (board.width(), board.height());
    let mut blocked = BlockedEdges {
        top: vec![false; width],
        bottom: vec![false; width],
        left: vec![false; height],
        right: vec![false; height],
    };

    let blob_count = rng.gen_range(3..=5);
    for _ in 0..blob_count {
        let span_x = width.saturating_sub(2 * BLOB_EDGE_MARGIN).max(1);
        let span_y = height.saturating_sub(2 * BLOB_EDGE_MARGIN).max(1);
        let blob_x = (BLOB_EDGE_MARGIN + rng.gen_range(0..span_x)) as i64;
        let blob_y = (BLOB_EDGE_MARGIN + rng.gen_range(0..span_y)) as i64;
        let radius: i64 = rng.gen_range(3..=7);

        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let distance = ((dx * dx + dy * dy) as f64).sqrt();
                if distance > radius as f64 * rng.gen::<f64>() {
                    continue;
                }

                let (nx, ny) = (blob_x + dx, blob_y + dy);
                if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
                    continue;
                }
                let (nx, ny) = (nx as usize, ny as usize);
                board.set(nx, ny, Cell::Wall);

                if ny == 0 {
                    blocked.top[nx] = true;
                }
                if ny == height - 1 {
                    blocked.bottom[nx] = true;
                }
                if nx == 0 {
                    blocked.left[ny] = true;
                }
                if nx == width - 1 {
                    blocked.right[ny] = true;
                }
            }
        }
    }

    for x in 0..width {
        if blocked.top[x] {
            board.set(x, height - 1, Cell::Wall);
        } else if blocked.bottom[x] {
            board.set(x, 0, Cell::Wall);
        }
    }
    for y in 0..height {
        if blocked.left[y] {
            board.set(width - 1, y, Cell::Wall);
        } else if blocked.right[y] {
            board.set(0, y, Cell::Wall);
        }
    }
}

/// Open a matching pair of gaps at the edge midpoints wherever an edge is sealed
fn ensure_gaps(board: &mut Board) {
    let (width, height) = (board.width(), board.height());
    let (mid_x, mid_y) = board.center();
    let [top, bottom, left, right] = board.edge_openings();

    if !top || !bottom {
        board.set(mid_x, 0, Cell::Empty);
        board.set(mid_x, height - 1, Cell::Empty);
    }
    if !left || !right {
        board.set(0, mid_y, Cell::Empty);
        board.set(width - 1, mid_y, Cell::Empty);
    }
}

/// Cut a corridor inward from both sides of every edge opening
fn clear_wrap_corridors(board: &mut Board) {
    let (width, height) = (board.width(), board.height());
    let depth_x = WRAP_CORRIDOR_DEPTH.min(width);
    let depth_y = WRAP_CORRIDOR_DEPTH.min(height);

    for y in 0..height {
        if board.is_empty_at(0, y) || board.is_empty_at(width - 1, y) {
            for i in 0..depth_x {
                board.set(i, y, Cell::Empty);
                board.set(width - 1 - i, y, Cell::Empty);
            }
        }
    }
    for x in 0..width {
        if board.is_empty_at(x, 0) || board.is_empty_at(x, height - 1) {
            for i in 0..depth_y {
                board.set(x, i, Cell::Empty);
                board.set(x, height - 1 - i, Cell::Empty);
            }
        }
    }
}

fn can_place_obstacle(board: &Board, x: usize, y: usize) -> bool {
    if !board.is_empty_at(x, y) || board.is_perimeter(x, y) {
        return false;
    }
    let (center_x, center_y) = board.center();
    let dx = x as f64 - center_x as f64;
    let dy = y as f64 - center_y as f64;
    (dx * dx + dy * dy).sqrt() > SPAWN_CLEARANCE
}

fn is_spawn_sector(sector_x: usize, sector_y: usize) -> bool {
    let mid_x = SECTORS_X / 2;
    let mid_y = SECTORS_Y / 2;
    (sector_x == mid_x || sector_x == mid_x - 1) && (sector_y == mid_y || sector_y == mid_y - 1)
}

/// Place obstacles sector by sector, topping up with free placements when
/// the sectors fall short. Returns the number placed.
fn scatter_obstacles(board: &mut Board, style: BoardStyle) -> usize {
    let (width, height) = (board.width(), board.height());
    let target = obstacle_target(style, width, height);
    let sequence = SeededSequence::new(style.index() as u64 * 1000);

    let sector_width = width as f64 / SECTORS_X as f64;
    let sector_height = height as f64 / SECTORS_Y as f64;
    let per_sector = target.div_ceil(SECTORS_X * SECTORS_Y);

    let mut placed = 0;

    'sectors: for sector_y in 0..SECTORS_Y {
        for sector_x in 0..SECTORS_X {
            if is_spawn_sector(sector_x, sector_y) {
                continue;
            }

            let start_x = (sector_x as f64 * sector_width).floor();
            let end_x = ((sector_x + 1) as f64 * sector_width).floor();
            let start_y = (sector_y as f64 * sector_height).floor();
            let end_y = ((sector_y + 1) as f64 * sector_height).floor();

            for i in 0..per_sector {
                if placed >= target {
                    break 'sectors;
                }

                let offset = ((sector_y * SECTORS_X + sector_x) * 1000 + i * 100) as u64;
                let x = (start_x + sequence.at(offset) * (end_x - start_x)).floor() as usize;
                let y = (start_y + sequence.at(offset + 50) * (end_y - start_y)).floor() as usize;

                if can_place_obstacle(board, x, y) {
                    board.set(x, y, Cell::Obstacle);
                    placed += 1;
                }
            }
        }
    }

    if (placed as f64) < target as f64 * TOP_UP_THRESHOLD {
        let attempts = (target - placed) * TOP_UP_ATTEMPTS_PER_MISSING;
        for i in 0..attempts {
            if placed >= target {
                break;
            }

            let offset = (10_000 + i * 200) as u64;
            let x = (sequence.at(offset) * width as f64).floor() as usize;
            let y = (sequence.at(offset + 100) * height as f64).floor() as usize;

            if can_place_obstacle(board, x, y) {
                board.set(x, y, Cell::Obstacle);
                placed += 1;
            }
        }

        // Seeded x and y lie on one diagonal band
        if placed < target {
            let seeded = placed;
            placed = sweep_obstacles(board, &sequence, target, placed);
            debug!(style = %style, seeded, placed, target, "obstacle sweep");
        }
    }

    placed
}

/// Visit every cell once in a fixed scattered order, placing obstacles until
/// the target is met
fn sweep_obstacles(
    board: &mut Board,
    sequence: &SeededSequence,
    target: usize,
    mut placed: usize,
) -> usize {
    let (width, height) = (board.width(), board.height());
    let area = width * height;
    if area == 0 {
        return placed;
    }

    let mut stride = ((area as f64 * SWEEP_STRIDE_RATIO) as usize).max(1);
    while gcd(stride, area) != 1 {
        stride += 1;
    }

    let mut index = (sequence.base() as usize) % area;
    for _ in 0..area {
        if placed >= target {
            break;
        }

        let (x, y) = (index % width, index / width);
        if can_place_obstacle(board, x, y) {
            board.set(x, y, Cell::Obstacle);
            placed += 1;
        }
        index = (index + stride) % area;
    }

    placed
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
