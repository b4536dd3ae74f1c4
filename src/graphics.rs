use macroquad::prelude::*;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{error, info, warn};

use trundle_kinematics::Pose;
use trundle_sim::{OccupancyGrid, RunState, VehicleShape};

use crate::status::{snapshot, StatusBoard};

// Function to configure the macroquad window
pub fn window_conf() -> Conf {
    Conf {
        window_title: "Trundle Diff-Steer Simulator".to_string(),
        window_width: 1000,
        window_height: 560,
        high_dpi: true,
        ..Default::default()
    }
}

/// World-to-screen mapping that fits the whole grid in the window with the
/// world y-axis pointing up.
struct Viewport {
    scale: f32,
    offset_x: f32,
    offset_y: f32,
    world_height: f32,
}

impl Viewport {
    fn fit(grid: &OccupancyGrid) -> Self {
        let world_w = grid.width() as f32;
        let world_h = grid.height() as f32;
        let scale = (screen_width() / world_w).min(screen_height() / world_h);
        Viewport {
            scale,
            offset_x: (screen_width() - world_w * scale) / 2.0,
            offset_y: (screen_height() - world_h * scale) / 2.0,
            world_height: world_h,
        }
    }

    fn to_screen(&self, x: f64, y: f64) -> Vec2 {
        Vec2::new(
            self.offset_x + x as f32 * self.scale,
            self.offset_y + (self.world_height - y as f32) * self.scale,
        )
    }
}

fn draw_grid(grid: &OccupancyGrid, view: &Viewport) {
    for cy in 0..grid.height() {
        for cx in 0..grid.width() {
            if grid.is_occupied(cx, cy) {
                let corner = view.to_screen(cx as f64, cy as f64 + 1.0);
                draw_rectangle(corner.x, corner.y, view.scale, view.scale, DARKGRAY);
            }
        }
    }
}

fn draw_trajectory(path: &[Pose], view: &Viewport) {
    for pair in path.windows(2) {
        let a = view.to_screen(pair[0].x, pair[0].y);
        let b = view.to_screen(pair[1].x, pair[1].y);
        draw_line(a.x, a.y, b.x, b.y, 1.5, SKYBLUE);
    }
}

fn draw_vehicle(shape: &VehicleShape, pose: &Pose, view: &Viewport) {
    let outline: Vec<Vec2> = shape
        .placed_at(pose)
        .iter()
        .map(|[x, y]| view.to_screen(*x, *y))
        .collect();

    // Fan fill from the first vertex, then the outline on top.
    for i in 1..outline.len().saturating_sub(1) {
        draw_triangle(outline[0], outline[i], outline[i + 1], BLUE);
    }
    for i in 0..outline.len() {
        let a = outline[i];
        let b = outline[(i + 1) % outline.len()];
        draw_line(a.x, a.y, b.x, b.y, 2.0, DARKBLUE);
    }
}

pub async fn run_visualization_loop(
    grid: OccupancyGrid,
    shape: VehicleShape,
    mut pose_rx: broadcast::Receiver<Arc<Pose>>,
    board: StatusBoard,
) {
    let mut path: Vec<Pose> = Vec::new();
    let mut channel_closed = false;

    info!("Visualization loop starting inside graphics module...");

    loop {
        // Drain every pose committed since the last frame.
        while !channel_closed {
            match pose_rx.try_recv() {
                Ok(pose_arc) => path.push(*pose_arc),
                Err(broadcast::error::TryRecvError::Empty) => break,
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    warn!("Visualization pose receiver lagged by {} poses.", n);
                }
                Err(broadcast::error::TryRecvError::Closed) => {
                    error!("Visualization pose channel closed; freezing the last frame.");
                    channel_closed = true;
                }
            }
        }

        clear_background(LIGHTGRAY);
        let view = Viewport::fit(&grid);

        draw_grid(&grid, &view);
        draw_trajectory(&path, &view);
        if let Some(pose) = path.last() {
            draw_vehicle(&shape, pose, &view);
        }

        let status = snapshot(&board);
        draw_text(
            &format!(
                "Robot: x={:.2} y={:.2} th={:.2}",
                status.pose.x, status.pose.y, status.pose.theta
            ),
            10.0,
            20.0,
            20.0,
            BLACK,
        );
        draw_text(
            &format!(
                "Steps: {}  t={:.1}s  {}",
                status.steps,
                status.elapsed,
                match status.state {
                    RunState::Idle => "idle",
                    RunState::Running => "running",
                    RunState::Completed => "completed",
                }
            ),
            10.0,
            40.0,
            20.0,
            BLACK,
        );
        for (i, fault) in status.faults.iter().enumerate() {
            draw_text(fault, 10.0, 60.0 + 20.0 * i as f32, 20.0, RED);
        }

        next_frame().await
    }
}
