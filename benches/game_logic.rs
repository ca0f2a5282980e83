use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::{IVec3, Vec3};
use tetris3d::core::{process_game_update, Block, Board3D, GameState, SimpleRng};
use tetris3d::types::{AxisRotation, BlockType, ColorRgb, FrameInput};

const VIEW: Vec3 = Vec3::new(-1.0, -0.5, -1.0);

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::default();
    let input = FrameInput::new();

    c.bench_function("game_update_16ms", |b| {
        b.iter(|| {
            process_game_update(&mut state, black_box(0.016), &input, VIEW);
        })
    });
}

fn bench_layer_clear(c: &mut Criterion) {
    c.bench_function("erase_4_layers", |b| {
        b.iter(|| {
            let mut board = Board3D::default();
            // Fill the bottom 4 layers
            for y in 0..4 {
                for x in 0..10 {
                    for z in 0..10 {
                        board.fill(IVec3::new(x, y, z), 0xFFFFFF);
                    }
                }
            }
            board.erase_filled_layers()
        })
    });
}

fn bench_block_spawn(c: &mut Criterion) {
    let board = Board3D::default();
    let mut rng = SimpleRng::new(12345);

    c.bench_function("spawn_block", |b| {
        b.iter(|| Block::create_random(black_box(&board), &mut rng))
    });
}

fn bench_try_translate(c: &mut Criterion) {
    let board = Board3D::default();
    let mut block = Block::create(BlockType::TShape, ColorRgb::new(255, 0, 0), &board);
    let mut delta = IVec3::X;

    c.bench_function("try_translate", |b| {
        b.iter(|| {
            if !block.try_translate(&board, delta) {
                delta = -delta;
            }
        })
    });
}

fn bench_try_rotate_with_fix(c: &mut Criterion) {
    let board = Board3D::default();
    let mut block = Block::create(BlockType::IShape, ColorRgb::new(0, 255, 255), &board);
    block.position = IVec3::new(8, 10, 1);

    c.bench_function("try_rotate_with_fix", |b| {
        b.iter(|| {
            block.try_rotate_with_fix(&board, black_box(AxisRotation::YClockwise));
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_layer_clear,
    bench_block_spawn,
    bench_try_translate,
    bench_try_rotate_with_fix
);
criterion_main!(benches);
