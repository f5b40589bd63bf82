//! On-screen controls drawn with egui.
//!
//! The overlay never touches the controller directly: each frame it returns
//! the inputs and commands the user produced, and the app feeds them in.

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::camera::CameraState;
use crate::core::{Direction, InputEvent, NavCommand, ReleaseCause};
use crate::gallery::Gallery;

pub const INSTRUCTIONS: &str =
    "Scroll or ←/→ to walk · drag to look around · click artwork to visit · ctrl+scroll to zoom";

const JOYSTICK_SIZE: f32 = 100.0;
const FIELD_OF_VIEW: f32 = 50.0;
const ARTWORK_SIZE: Vec2 = Vec2::new(2.4, 1.8);

const ACCENT: egui::Color32 = egui::Color32::from_rgb(74, 158, 255);

#[derive(Debug, Clone, PartialEq)]
pub enum OverlayAction {
    Input(InputEvent),
    Command(NavCommand),
    /// An artwork on the canvas was clicked
    Select { index: usize },
}

/// Read-only snapshot of navigation state for one overlay frame
pub struct OverlayView<'a> {
    pub camera: CameraState,
    pub gallery: &'a Gallery,
    pub titles: &'a [String],
    pub current_index: usize,
    pub is_transitioning: bool,
    pub notice: Option<&'static str>,
}

#[derive(Debug, Default)]
pub struct Overlay {
    holding: Option<Direction>,
    /// Knob offset from the joystick centre, for drawing
    knob: Vec2,
    show_controls: bool,
}

impl Overlay {
    pub fn new(show_controls: bool) -> Self {
        Self {
            show_controls,
            ..Default::default()
        }
    }

    pub fn show(&mut self, ctx: &egui::Context, view: &OverlayView<'_>) -> Vec<OverlayAction> {
        let mut actions = Vec::new();

        let screen = ctx.content_rect();
        let quads = artwork_quads(view, screen);
        draw_artworks(ctx, view, &quads);
        if let Some(index) = clicked_artwork(ctx, &quads) {
            actions.push(OverlayAction::Select { index });
        }

        if let Some(notice) = view.notice {
            egui::Area::new(egui::Id::new("paused_notice"))
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    egui::Frame::NONE
                        .fill(egui::Color32::from_black_alpha(200))
                        .inner_margin(16.0)
                        .show(ui, |ui| {
                            ui.label(
                                egui::RichText::new(notice)
                                    .size(20.0)
                                    .color(egui::Color32::from_rgb(255, 180, 80)),
                            );
                        });
                });
        }

        if !self.show_controls {
            return actions;
        }

        egui::Area::new(egui::Id::new("instructions"))
            .anchor(egui::Align2::CENTER_TOP, [0.0, 10.0])
            .show(ctx, |ui| {
                ui.label(egui::RichText::new(INSTRUCTIONS).size(13.0).color(egui::Color32::GRAY));
            });

        egui::Area::new(egui::Id::new("walk_controls"))
            .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -20.0])
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    self.hold_button(ui, "◀", Direction::Left, &mut actions);
                    if ui.button("Home").clicked() {
                        actions.push(OverlayAction::Command(NavCommand::Home));
                    }
                    self.hold_button(ui, "▶", Direction::Right, &mut actions);
                });
            });

        egui::Area::new(egui::Id::new("joystick"))
            .anchor(egui::Align2::LEFT_BOTTOM, [20.0, -20.0])
            .show(ctx, |ui| self.joystick(ui, &mut actions));

        egui::Area::new(egui::Id::new("exhibit_list"))
            .anchor(egui::Align2::RIGHT_TOP, [-10.0, 10.0])
            .show(ctx, |ui| {
                egui::Frame::NONE
                    .fill(egui::Color32::from_black_alpha(140))
                    .inner_margin(8.0)
                    .show(ui, |ui| {
                        for (index, title) in view.titles.iter().enumerate() {
                            let selected = index == view.current_index;
                            if ui.selectable_label(selected, title.as_str()).clicked() {
                                actions.push(OverlayAction::Command(NavCommand::Jump { index }));
                            }
                        }
                        if view.is_transitioning {
                            ui.label(egui::RichText::new("moving…").size(11.0).color(ACCENT));
                        }
                    });
            });

        actions
    }

    /// Direction button that repeats while held
    fn hold_button(
        &mut self,
        ui: &mut egui::Ui,
        label: &str,
        direction: Direction,
        actions: &mut Vec<OverlayAction>,
    ) {
        let response = ui.add(egui::Button::new(label).min_size(egui::vec2(48.0, 48.0)));
        let pressed_now =
            response.is_pointer_button_down_on() && ui.input(|i| i.pointer.any_pressed());

        if pressed_now && self.holding.is_none() {
            self.holding = Some(direction);
            actions.push(OverlayAction::Input(InputEvent::PressStart { direction }));
            return;
        }

        if self.holding != Some(direction) {
            return;
        }
        let cause = if !response.contains_pointer() {
            Some(ReleaseCause::PointerLeave)
        } else if !ui.input(|i| i.pointer.any_down()) {
            Some(ReleaseCause::PointerUp)
        } else {
            None
        };
        if let Some(cause) = cause {
            self.holding = None;
            actions.push(OverlayAction::Input(InputEvent::PressRelease { cause }));
        }
    }

    fn joystick(&mut self, ui: &mut egui::Ui, actions: &mut Vec<OverlayAction>) {
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(JOYSTICK_SIZE, JOYSTICK_SIZE), egui::Sense::drag());
        let center = rect.center();
        let radius = JOYSTICK_SIZE / 2.0;

        if response.dragged() {
            if let Some(pointer) = response.interact_pointer_pos() {
                let pointer = Vec2::new(pointer.x, pointer.y);
                let center = Vec2::new(center.x, center.y);
                self.knob = (pointer - center).clamp_length_max(radius);
                actions.push(OverlayAction::Input(InputEvent::JoystickMove { pointer, center }));
            }
        }
        if response.drag_stopped() {
            self.knob = Vec2::ZERO;
            actions.push(OverlayAction::Input(InputEvent::JoystickRelease));
        }

        let painter = ui.painter();
        painter.circle_filled(center, radius, egui::Color32::from_white_alpha(30));
        painter.circle_stroke(center, radius, egui::Stroke::new(1.0, egui::Color32::GRAY));
        painter.circle_filled(center + egui::vec2(self.knob.x, self.knob.y), radius * 0.4, ACCENT);
    }
}

/// Screen-space outline of one artwork
#[derive(Debug, Clone)]
struct ArtworkQuad {
    index: usize,
    points: Vec<egui::Pos2>,
}

/// Project every artwork that is fully in front of the camera
fn artwork_quads(view: &OverlayView<'_>, screen: egui::Rect) -> Vec<ArtworkQuad> {
    if screen.width() <= 0.0 || screen.height() <= 0.0 {
        return Vec::new();
    }

    let projection = Mat4::perspective_rh(
        FIELD_OF_VIEW.to_radians(),
        screen.width() / screen.height(),
        0.1,
        100.0,
    );
    let view_proj = projection * view.camera.view_matrix();
    let half = ARTWORK_SIZE / 2.0;

    view.gallery
        .targets()
        .iter()
        .filter_map(|target| {
            let center = target.artwork_position();
            let corners = [
                center + Vec3::new(-half.x, -half.y, 0.0),
                center + Vec3::new(half.x, -half.y, 0.0),
                center + Vec3::new(half.x, half.y, 0.0),
                center + Vec3::new(-half.x, half.y, 0.0),
            ];
            let points = corners
                .iter()
                .map(|corner| project(view_proj, *corner, screen))
                .collect::<Option<Vec<_>>>()?;
            Some(ArtworkQuad {
                index: target.index,
                points,
            })
        })
        .collect()
}

/// Paint each artwork as a projected quad on the background layer
fn draw_artworks(ctx: &egui::Context, view: &OverlayView<'_>, quads: &[ArtworkQuad]) {
    let painter = ctx.layer_painter(egui::LayerId::background());

    for quad in quads {
        let highlighted = quad.index == view.current_index;
        let stroke = if highlighted {
            egui::Stroke::new(2.0, ACCENT)
        } else {
            egui::Stroke::new(1.0, egui::Color32::from_gray(90))
        };
        painter.add(egui::Shape::convex_polygon(
            quad.points.clone(),
            egui::Color32::from_gray(45),
            stroke,
        ));

        if let Some(title) = view.titles.get(quad.index) {
            let points = &quad.points;
            let bottom = egui::pos2((points[0].x + points[1].x) / 2.0, points[0].y.max(points[1].y));
            painter.text(
                bottom + egui::vec2(0.0, 6.0),
                egui::Align2::CENTER_TOP,
                title,
                egui::FontId::proportional(13.0),
                egui::Color32::LIGHT_GRAY,
            );
        }
    }
}

/// Artwork under a primary click that landed on the bare canvas
fn clicked_artwork(ctx: &egui::Context, quads: &[ArtworkQuad]) -> Option<usize> {
    let pos = ctx.input(|i| {
        if i.pointer.primary_clicked() {
            i.pointer.interact_pos()
        } else {
            None
        }
    })?;
    if ctx.wants_pointer_input() || ctx.is_pointer_over_area() {
        return None;
    }
    artwork_at(quads, pos)
}

/// Topmost quad containing `point`; later quads are painted over earlier ones
fn artwork_at(quads: &[ArtworkQuad], point: egui::Pos2) -> Option<usize> {
    quads
        .iter()
        .rev()
        .find(|quad| convex_contains(&quad.points, point))
        .map(|quad| quad.index)
}

/// Point-in-polygon for a convex outline of either winding
fn convex_contains(points: &[egui::Pos2], point: egui::Pos2) -> bool {
    if points.len() < 3 {
        return false;
    }
    let mut winding = 0.0f32;
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        let edge = b - *a;
        let to_point = point - *a;
        let cross = edge.x * to_point.y - edge.y * to_point.x;
        if cross.abs() <= f32::EPSILON {
            continue;
        }
        if winding == 0.0 {
            winding = cross.signum();
        } else if cross.signum() != winding {
            return false;
        }
    }
    true
}

/// World point to screen position; `None` when behind the camera
pub fn project(view_proj: Mat4, world: Vec3, screen: egui::Rect) -> Option<egui::Pos2> {
    let clip = view_proj * Vec4::new(world.x, world.y, world.z, 1.0);
    if clip.w <= 1e-4 {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    Some(egui::pos2(
        screen.left() + (ndc.x + 1.0) * 0.5 * screen.width(),
        screen.top() + (1.0 - ndc.y) * 0.5 * screen.height(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> egui::Rect {
        egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(800.0, 600.0))
    }

    fn view_proj(camera: &CameraState) -> Mat4 {
        Mat4::perspective_rh(FIELD_OF_VIEW.to_radians(), 800.0 / 600.0, 0.1, 100.0)
            * camera.view_matrix()
    }

    #[test]
    fn look_at_point_projects_to_screen_centre() {
        let camera = CameraState::new(Vec3::new(0.0, 1.0, 5.0), Vec3::new(0.0, 0.5, 0.0));
        let point = project(view_proj(&camera), camera.look_at, screen()).unwrap();
        assert!((point.x - 400.0).abs() < 0.5);
        assert!((point.y - 300.0).abs() < 0.5);
    }

    #[test]
    fn points_behind_camera_are_culled() {
        let camera = CameraState::new(Vec3::new(0.0, 1.0, 5.0), Vec3::new(0.0, 0.5, 0.0));
        assert!(project(view_proj(&camera), Vec3::new(0.0, 1.0, 10.0), screen()).is_none());
    }

    fn gallery_view<'a>(gallery: &'a Gallery, camera: CameraState) -> OverlayView<'a> {
        OverlayView {
            camera,
            gallery,
            titles: &[],
            current_index: 2,
            is_transitioning: false,
            notice: None,
        }
    }

    /// Camera parked in front of the third artwork, as after `jump_to(2)`
    fn facing_third() -> CameraState {
        CameraState::new(Vec3::new(8.0, 1.0, 5.0), Vec3::new(8.0, 0.5, 0.0))
    }

    fn raw_input(events: Vec<egui::Event>) -> egui::RawInput {
        egui::RawInput {
            screen_rect: Some(screen()),
            events,
            ..Default::default()
        }
    }

    fn button(pos: egui::Pos2, pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::NONE,
        }
    }

    #[test]
    fn artwork_centre_hits_its_quad() {
        let gallery = Gallery::with_count(5, 4.0, 2.0).unwrap();
        let view = gallery_view(&gallery, facing_third());
        let quads = artwork_quads(&view, screen());

        let centre = project(
            view_proj(&view.camera),
            gallery.target(2).artwork_position(),
            screen(),
        )
        .unwrap();
        assert_eq!(artwork_at(&quads, centre), Some(2));

        let neighbour = project(
            view_proj(&view.camera),
            gallery.target(3).artwork_position(),
            screen(),
        )
        .unwrap();
        assert_eq!(artwork_at(&quads, neighbour), Some(3));
    }

    #[test]
    fn gap_between_artworks_hits_nothing() {
        let gallery = Gallery::with_count(5, 4.0, 2.0).unwrap();
        let view = gallery_view(&gallery, facing_third());
        let quads = artwork_quads(&view, screen());

        // Midway between the third and fourth frames on the wall
        let gap = project(view_proj(&view.camera), Vec3::new(10.0, 0.5, -3.5), screen()).unwrap();
        assert_eq!(artwork_at(&quads, gap), None);
    }

    #[test]
    fn convex_contains_accepts_either_winding() {
        let square = [
            egui::pos2(0.0, 0.0),
            egui::pos2(10.0, 0.0),
            egui::pos2(10.0, 10.0),
            egui::pos2(0.0, 10.0),
        ];
        let mut reversed = square;
        reversed.reverse();

        for outline in [&square[..], &reversed[..]] {
            assert!(convex_contains(outline, egui::pos2(5.0, 5.0)));
            assert!(!convex_contains(outline, egui::pos2(15.0, 5.0)));
        }
        assert!(!convex_contains(&square[..2], egui::pos2(5.0, 0.0)));
    }

    #[test]
    fn clicking_artwork_selects_it() {
        let gallery = Gallery::with_count(5, 4.0, 2.0).unwrap();
        let view = gallery_view(&gallery, facing_third());
        let centre = project(
            view_proj(&view.camera),
            gallery.target(2).artwork_position(),
            screen(),
        )
        .unwrap();

        let ctx = egui::Context::default();
        let mut overlay = Overlay::new(false);
        let frames = [
            vec![egui::Event::PointerMoved(centre)],
            vec![button(centre, true)],
            vec![button(centre, false)],
        ];

        let mut actions = Vec::new();
        for events in frames {
            let _ = ctx.run(raw_input(events), |ctx| {
                actions.extend(overlay.show(ctx, &view));
            });
        }

        assert_eq!(actions, vec![OverlayAction::Select { index: 2 }]);
    }

    #[test]
    fn points_to_the_right_land_right_of_centre() {
        let camera = CameraState::new(Vec3::new(0.0, 1.0, 5.0), Vec3::new(0.0, 0.5, 0.0));
        let point = project(view_proj(&camera), Vec3::new(1.0, 0.5, 0.0), screen()).unwrap();
        assert!(point.x > 400.0);
    }
}
