use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tile_blast::core::{Grid, GridSnapshot};
use tile_blast::engine::{Effect, GameView, Phase, TurnOrchestrator};
use tile_blast::types::{GameConfig, GravityMove, InputEvent, RefillCell, TilePos};

struct NopView;

impl GameView for NopView {
    fn render_grid(&mut self, _snapshot: &GridSnapshot) {}
    fn animate_removal(&mut self, _cells: &[TilePos]) {}
    fn animate_board_update(&mut self, _moves: &[GravityMove], _created: &[RefillCell]) {}
    fn selection_changed(&mut self, _selection: Option<TilePos>) {}
    fn show_mega_bomb(&mut self, _pos: TilePos) {}
    fn play_effect(&mut self, _effect: Effect) {}
    fn on_win(&mut self) {}
    fn on_lose(&mut self) {}
    fn on_no_moves(&mut self, _reshuffles_left: u32) {}
    fn on_bombs_changed(&mut self, _bombs_left: u32) {}
    fn on_teleports_changed(&mut self, _teleports_left: u32) {}
}

fn bench_find_group(c: &mut Criterion) {
    // Few colors make for large groups, the expensive case
    let mut grid = Grid::new(9, 9, 3, 12345);
    grid.random_fill();

    c.bench_function("find_group", |b| {
        b.iter(|| grid.find_group(black_box(TilePos::new(4, 4))))
    });
}

fn bench_gravity_refill(c: &mut Criterion) {
    let mut grid = Grid::new(9, 9, 5, 12345);
    grid.random_fill();
    for i in 0..30 {
        grid.set(TilePos::new((i * 7) % 9, (i * 5) % 9), None);
    }

    c.bench_function("gravity_and_refill", |b| {
        b.iter(|| {
            let mut g = grid.clone();
            g.apply_gravity();
            g.refill_empty_cells();
        })
    });
}

fn bench_has_any_moves(c: &mut Criterion) {
    let mut grid = Grid::new(9, 9, 5, 12345);
    grid.random_fill();

    c.bench_function("has_any_moves", |b| {
        b.iter(|| grid.has_any_moves(black_box(2)))
    });
}

fn bench_full_turn(c: &mut Criterion) {
    let mut base = Grid::new(9, 9, 3, 12345);
    base.random_fill();
    let mut view = NopView;

    c.bench_function("click_turn_pipeline", |b| {
        b.iter(|| {
            let mut orch = TurnOrchestrator::from_parts(GameConfig::default(), base.clone());
            orch.handle_event(InputEvent::TileClick { row: 4, col: 4 }, &mut view);
            while orch.phase() == Phase::Animating {
                orch.animation_done(&mut view);
            }
            black_box(orch.turn().score())
        })
    });
}

criterion_group!(
    benches,
    bench_find_group,
    bench_gravity_refill,
    bench_has_any_moves,
    bench_full_turn
);
criterion_main!(benches);
