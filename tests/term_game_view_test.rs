use tui_columns::core::{DropOutcome, GameController};
use tui_columns::term::{AnchorY, GameView, TerminalRenderer, Viewport};
use tui_columns::types::{Color, ViewAngle};

fn text_rows(fb: &tui_columns::term::FrameBuffer) -> Vec<String> {
    (0..fb.height()).map(|y| fb.row_text(y)).collect()
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameController::new(1).snapshot();
    let view = GameView::default().with_help(false);

    // Tilted: 8 cells * 2 wide + border = 18, 17 rows + border = 19.
    let fb = view.render(&snap, Viewport::new(18, 19));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(17, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 18).unwrap().ch, '└');
    assert_eq!(fb.get(17, 18).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_settled_cell_two_chars_wide() {
    let mut game = GameController::new(1);
    game.set_view_angle(ViewAngle::Front);
    game.grid_mut().set(16, 0, Color::Blue).unwrap();
    let snap = game.snapshot();

    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, Viewport::new(18, 19));

    let (x0, y0) = (1, 1 + 16);
    for x in [x0, x0 + 1] {
        let cell = fb.get(x, y0).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!((cell.style.fg.r, cell.style.fg.g, cell.style.fg.b), Color::Blue.rgb());
    }
    assert_eq!(fb.get(x0 + 2, y0).unwrap().ch, '·');
}

#[test]
fn term_view_shows_game_over_after_high_lock() {
    let mut game = GameController::new(1);
    game.start();
    game.grid_mut().set(3, 3, Color::Red).unwrap();
    assert_eq!(game.drop_step(), DropOutcome::GameOver);

    let fb = GameView::default().render(&game.snapshot(), Viewport::new(60, 24));
    assert!(text_rows(&fb).iter().any(|row| row.contains("GAME OVER")));
}

#[test]
fn term_view_panel_tracks_view_preset() {
    let mut game = GameController::new(1);
    game.start();
    game.set_view_angle(ViewAngle::Side);

    let fb = GameView::default().render(&game.snapshot(), Viewport::new(60, 24));
    let rows = text_rows(&fb);
    assert!(rows.iter().any(|row| row.contains("SPEED")));
    assert!(rows.iter().any(|row| row.contains("side")));
}

#[test]
fn renderer_flushes_rendered_frame() {
    let game = GameController::new(1);
    let mut fb = GameView::default().render(&game.snapshot(), Viewport::new(60, 24));

    let mut renderer = TerminalRenderer::with_writer(Vec::new());
    renderer.draw_swap(&mut fb).unwrap();
    let out = String::from_utf8_lossy(renderer.writer()).into_owned();
    assert!(out.contains("SCORE"));
}
