use mr_tet::core::{ActiveSnapshot, GameState};
use mr_tet::term::{piece_color, AnchorY, FrameBuffer, GameView, Hud, Viewport};
use mr_tet::types::{PieceKind, Rotation, SessionState};

fn screen_text(fb: &FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        all.push_str(&fb.row_text(y));
        all.push('\n');
    }
    all
}

fn playing_snapshot() -> mr_tet::core::GameSnapshot {
    let mut gs = GameState::new(1);
    gs.start();
    gs.snapshot()
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default();

    // cell_w=2, cell_h=1: 20x20 board plus border => 22x22.
    let fb = view.render(&snap, &Hud::default(), Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '╔');
    assert_eq!(fb.get(21, 0).unwrap().ch, '╗');
    assert_eq!(fb.get(0, 21).unwrap().ch, '╚');
    assert_eq!(fb.get(21, 21).unwrap().ch, '╝');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = playing_snapshot();
    snap.board[19][0] = PieceKind::S.id();
    snap.active = None;
    snap.ghost_y = None;

    let fb = GameView::default().render(&snap, &Hud::default(), Viewport::new(22, 22));

    let (x0, y0) = (1, 1 + 19);
    for x in [x0, x0 + 1] {
        let cell = fb.get(x, y0).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, piece_color(PieceKind::S));
    }
    assert_eq!(fb.get(x0 + 2, y0).unwrap().ch, '·');
}

#[test]
fn term_view_draws_active_and_ghost() {
    let mut snap = playing_snapshot();
    snap.board = [[0; 10]; 20];
    snap.active = Some(ActiveSnapshot {
        kind: PieceKind::O,
        rotation: Rotation::North,
        x: 4,
        y: 0,
    });
    snap.ghost_y = Some(18);

    let fb = GameView::default().render(&snap, &Hud::default(), Viewport::new(22, 22));

    // Column 4 starts at screen x = 1 + 4 * 2.
    assert_eq!(fb.get(9, 1).unwrap().ch, '█');
    assert_eq!(fb.get(9, 1 + 18).unwrap().ch, '░');
    assert_eq!(fb.get(9, 1 + 19).unwrap().ch, '░');
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = playing_snapshot();
    snap.score = 1234;
    snap.level = 2;
    snap.lines = 10;

    let hud = Hud { best: Some(98_765) };
    let all = screen_text(&GameView::default().render(&snap, &hud, Viewport::new(60, 22)));

    for word in ["SCORE", "1234", "LEVEL", "LINES", "NEXT", "BEST", "98765"] {
        assert!(all.contains(word), "missing {word}");
    }
}

#[test]
fn term_view_skips_panel_on_narrow_viewports() {
    let snap = playing_snapshot();
    let all = screen_text(&GameView::default().render(&snap, &Hud::default(), Viewport::new(22, 22)));
    assert!(!all.contains("SCORE"));
}

#[test]
fn term_view_overlays_follow_session_state() {
    let view = GameView::default();
    let vp = Viewport::new(60, 24);
    let hud = Hud { best: Some(4200) };

    let mut snap = GameState::new(1).snapshot();
    assert_eq!(snap.state, SessionState::Idle);
    let idle = screen_text(&view.render(&snap, &hud, vp));
    assert!(idle.contains("MR. TET"));
    assert!(idle.contains("press ENTER"));
    assert!(idle.contains("BEST 4200"));

    snap.state = SessionState::Paused;
    assert!(screen_text(&view.render(&snap, &hud, vp)).contains("PAUSED"));

    snap.state = SessionState::GameOver;
    snap.score = 321;
    let over = screen_text(&view.render(&snap, &hud, vp));
    assert!(over.contains("GAME OVER"));
    assert!(over.contains("SCORE 321"));

    snap.state = SessionState::Playing;
    let playing = screen_text(&view.render(&snap, &hud, vp));
    assert!(!playing.contains("GAME OVER"));
    assert!(!playing.contains("PAUSED"));
}

#[test]
fn term_view_centers_board_by_default_on_tall_viewports() {
    let snap = GameState::new(1).snapshot();
    let fb = GameView::default().render(&snap, &Hud::default(), Viewport::new(22, 30));

    // start_y = (30 - 22) / 2 = 4
    assert_eq!(fb.get(0, 4).unwrap().ch, '╔');
}

#[test]
fn term_view_can_anchor_board_to_top() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, &Hud::default(), Viewport::new(22, 30));

    assert_eq!(fb.get(0, 0).unwrap().ch, '╔');
}
