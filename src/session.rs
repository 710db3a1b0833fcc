//! Preview Session
//!
//! [`ShadowSim`] owns everything one preview needs: the sun and its shadow
//! frustum, the ground, the (optional) loaded character with its animation
//! controller, and the two cameras. The host drives it with three calls:
//!
//! - [`ShadowSim::handle`] for each [`ControlEvent`] from the panel,
//! - [`ShadowSim::update`] once per frame with the elapsed seconds,
//! - [`ShadowSim::render_frame`] to get the shadow pass and both views.
//!
//! Everything runs on the host's thread; there is no internal concurrency.

use glam::{Mat4, Vec3};

use crate::animation::AnimationController;
use crate::assets::LoadedModel;
use crate::errors::SimError;
use crate::gui::ControlEvent;
use crate::gui::panel::PanelState;
use crate::params::{Params, SimConfig};
use crate::scene::{DirectionalLight, GroundPlane, Model, PerspectiveCamera, SplitView, Viewport};
use crate::shadow::{FrustumBound, ShadowCameraHelper, ShadowFrustumBounds, ShadowFrustumConfigurator};
use crate::sun::{self, SunAngles};
use crate::utils::{Input, OrbitControls};

/// Where the orbit camera starts.
pub const ORBIT_CAMERA_START: Vec3 = Vec3::new(0.0, 10.0, 5.0);

/// Resting place of the top-down camera.
pub const TOP_DOWN_HOME: Vec3 = Vec3::new(0.0, 20.0, 10.0);

const WALK_ACTION: &str = "walk";
const IDLE_ACTION: &str = crate::animation::IDLE_ACTION;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkDirection {
    /// The character walks into the frame: the camera glides back to home.
    In,
    /// The character walks out of frame: the camera glides away from home.
    Out,
}

/// A walk in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Walk {
    pub direction: WalkDirection,
    pub remaining: f32,
    /// Where the top-down camera stops.
    pub end: Vec3,
}

/// One rendered view of the split screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSetup {
    pub viewport: Viewport,
    pub view_projection: Mat4,
    pub clear_color: [f32; 4],
}

/// Inputs for one frame of rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameViews {
    pub shadow_view_projection: Option<Mat4>,
    pub shadow_map_size: u32,
    pub orbit: ViewSetup,
    pub top_down: ViewSetup,
}

pub struct ShadowSim {
    config: SimConfig,
    params: Params,

    light: DirectionalLight,
    light_distance: f32,
    shadow_helper: Option<ShadowCameraHelper>,
    ground: GroundPlane,

    model: Option<Model>,
    animation: Option<AnimationController>,

    camera: PerspectiveCamera,
    controls: OrbitControls,
    top_down_camera: PerspectiveCamera,
    walk: Option<Walk>,

    split: SplitView,
}

impl ShadowSim {
    #[must_use]
    pub fn new(config: SimConfig, width: u32, height: u32) -> Self {
        let mut params = config.params.clone();
        let split = SplitView::new(width, height);

        let light = DirectionalLight::sun(&params.shadow_bounds());
        // The panel starts from wherever the light actually is
        let angles = sun::light_angles(light.position);
        params.azimuth = angles.azimuth as f32;
        params.altitude = angles.altitude as f32;
        let light_distance = light.distance();

        let mut camera = PerspectiveCamera::new_perspective(75.0, split.aspect(), 0.1, 1000.0)
            .with_name("Orbit Camera");
        camera.set_position(ORBIT_CAMERA_START);
        camera.look_at(Vec3::ZERO);
        let controls = OrbitControls::from_position(ORBIT_CAMERA_START, Vec3::ZERO);

        let top_down_camera = PerspectiveCamera::new_perspective(75.0, split.aspect(), 0.1, 1000.0)
            .with_name("Top-Down Camera");

        let mut sim = Self {
            config,
            params,
            light,
            light_distance,
            shadow_helper: None,
            ground: GroundPlane::default(),
            model: None,
            animation: None,
            camera,
            controls,
            top_down_camera,
            walk: None,
            split,
        };
        sim.reset_top_down_camera();
        if sim.params.show_shadow_helper {
            sim.set_shadow_helper(true);
        }
        sim
    }

    // ========================================================================
    // Asset lifecycle
    // ========================================================================

    /// Installs a freshly loaded character and starts its base actions.
    pub fn on_model_loaded(&mut self, loaded: LoadedModel) {
        let LoadedModel { mut model, clips } = loaded;

        model.prepare_for_shadow_preview(self.params.show_model);
        model.set_uniform_scale(self.config.model_scale);
        model.place_on_ground();
        model.capture_original_rotation();
        model.set_rotation_degrees(self.params.rotation);

        let mut controller = AnimationController::default();
        let bound = controller.setup_animations(clips);
        controller.set_playback_speed(self.config.playback_speed);
        log::info!("Bound {bound} base actions for '{}'", model.name);

        self.model = Some(model);
        self.animation = Some(controller);
        self.walk = None;
        self.reset_top_down_camera();
    }

    /// The preview keeps running without a character.
    pub fn on_model_failed(&mut self, error: &SimError) {
        log::error!("An error happened while loading the model: {error}");
        self.model = None;
        self.animation = None;
    }

    // ========================================================================
    // Controls
    // ========================================================================

    pub fn handle(&mut self, event: ControlEvent) {
        match event {
            ControlEvent::Rotation(degrees) => {
                self.params.rotation = degrees;
                if let Some(model) = &mut self.model {
                    model.set_rotation_degrees(degrees);
                }
            }
            ControlEvent::Azimuth(azimuth) => {
                self.params.azimuth = azimuth;
                self.update_light();
            }
            ControlEvent::Altitude(altitude) => {
                self.params.altitude = altitude;
                self.update_light();
            }
            ControlEvent::ShadowBound(bound, value) => {
                self.set_shadow_param(bound, value);
                ShadowFrustumConfigurator::set_bound(&mut self.light.shadow, bound, value);
                self.refresh_shadow_helper();
            }
            ControlEvent::ShadowMapSize(size) => {
                self.params.shadow_map_size = size;
                ShadowFrustumConfigurator::set_map_size(&mut self.light.shadow, size);
            }
            ControlEvent::ShowShadowHelper(show) => {
                self.params.show_shadow_helper = show;
                self.set_shadow_helper(show);
            }
            ControlEvent::ShowModel(show) => {
                self.params.show_model = show;
                if let Some(model) = &mut self.model {
                    model.set_visible(show);
                }
            }
            ControlEvent::BaseAction(name) => {
                self.reset_top_down_camera();
                let duration = self.config.cross_fade_duration();
                if let Some(animation) = &mut self.animation {
                    animation.select_base_action(&name, duration);
                }
            }
            ControlEvent::WalkIn => self.start_walk(WalkDirection::In),
            ControlEvent::WalkOut => self.start_walk(WalkDirection::Out),
        }
    }

    /// Replaces the whole shadow frustum at once.
    pub fn apply_shadow_bounds(&mut self, bounds: &ShadowFrustumBounds) {
        ShadowFrustumConfigurator::apply(&mut self.light.shadow, bounds);
        self.params.shadow_near = bounds.near;
        self.params.shadow_far = bounds.far;
        self.params.shadow_left = bounds.left;
        self.params.shadow_right = bounds.right;
        self.params.shadow_top = bounds.top;
        self.params.shadow_bottom = bounds.bottom;
        self.params.shadow_map_size = bounds.map_size;
        self.refresh_shadow_helper();
    }

    fn set_shadow_param(&mut self, bound: FrustumBound, value: f32) {
        let slot = match bound {
            FrustumBound::Near => &mut self.params.shadow_near,
            FrustumBound::Far => &mut self.params.shadow_far,
            FrustumBound::Left => &mut self.params.shadow_left,
            FrustumBound::Right => &mut self.params.shadow_right,
            FrustumBound::Top => &mut self.params.shadow_top,
            FrustumBound::Bottom => &mut self.params.shadow_bottom,
        };
        *slot = value;
    }

    fn update_light(&mut self) {
        let angles = SunAngles {
            azimuth: f64::from(self.params.azimuth),
            altitude: f64::from(self.params.altitude),
        };
        self.light.position = sun::light_position(angles, self.light_distance);
        self.refresh_shadow_helper();
    }

    fn set_shadow_helper(&mut self, show: bool) {
        if show {
            self.shadow_helper = Some(ShadowCameraHelper::new(
                self.light.view_matrix(),
                &self.light.shadow.camera,
            ));
        } else if self.shadow_helper.take().is_some() {
            log::debug!("Shadow helper removed");
        }
    }

    fn refresh_shadow_helper(&mut self) {
        if let Some(helper) = &mut self.shadow_helper {
            helper.update(self.light.view_matrix(), &self.light.shadow.camera);
        }
    }

    // ========================================================================
    // Walk in / walk out
    // ========================================================================

    fn start_walk(&mut self, direction: WalkDirection) {
        self.reset_top_down_camera();
        let travel = Vec3::Z * self.config.walk_distance;
        let end = match direction {
            WalkDirection::In => {
                self.top_down_camera.set_position(TOP_DOWN_HOME + travel);
                TOP_DOWN_HOME
            }
            WalkDirection::Out => TOP_DOWN_HOME - travel,
        };

        self.walk = Some(Walk {
            direction,
            remaining: self.config.walk_duration(),
            end,
        });

        let duration = self.config.cross_fade_duration();
        if let Some(animation) = &mut self.animation {
            animation.select_base_action(WALK_ACTION, duration);
        }
        log::debug!("Walk {direction:?} started");
    }

    fn advance_walk(&mut self, dt: f32) {
        let Some(walk) = &mut self.walk else {
            return;
        };

        let step = dt.min(walk.remaining).max(0.0);
        walk.remaining -= dt;

        let mut position = self.top_down_camera.position();
        position.z -= self.config.walk_speed() * step;
        self.top_down_camera.set_position(position);

        if walk.remaining <= 0.0 {
            log::debug!("Walk {:?} finished", walk.direction);
            self.top_down_camera.set_position(walk.end);
            self.walk = None;
            let duration = self.config.cross_fade_duration();
            if let Some(animation) = &mut self.animation {
                animation.select_base_action(IDLE_ACTION, duration);
            }
        }
    }

    pub fn reset_top_down_camera(&mut self) {
        self.top_down_camera.set_position(TOP_DOWN_HOME);
        self.top_down_camera.look_at(Vec3::ZERO);
    }

    // ========================================================================
    // Frame
    // ========================================================================

    /// Advances the preview by `dt` seconds.
    pub fn update(&mut self, dt: f32, input: &Input) {
        self.controls.update(&mut self.camera, input, dt);

        if let Some(animation) = &mut self.animation {
            animation.update(dt);
        }

        self.advance_walk(dt);

        let p = self.top_down_camera.position();
        self.top_down_camera.look_at(Vec3::new(p.x, 0.0, p.z));
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.split = SplitView::new(width, height);
        let aspect = self.split.aspect();
        self.camera.set_aspect(aspect);
        self.top_down_camera.set_aspect(aspect);
    }

    /// Prepares the shadow target and returns what each pass should draw.
    pub fn render_frame(&mut self) -> FrameViews {
        let shadow_view_projection = if self.light.cast_shadows {
            self.light.shadow.prepare_map();
            Some(self.light.shadow_view_projection())
        } else {
            None
        };

        let clear_color = [0.0, 0.0, 0.0, 1.0];
        FrameViews {
            shadow_view_projection,
            shadow_map_size: self.light.shadow.map_size().x,
            orbit: ViewSetup {
                viewport: self.split.left,
                view_projection: self.camera.view_projection_matrix(),
                clear_color,
            },
            top_down: ViewSetup {
                viewport: self.split.right,
                view_projection: self.top_down_camera.view_projection_matrix(),
                clear_color,
            },
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[must_use]
    pub fn params(&self) -> &Params {
        &self.params
    }

    #[must_use]
    pub fn light(&self) -> &DirectionalLight {
        &self.light
    }

    #[must_use]
    pub fn light_distance(&self) -> f32 {
        self.light_distance
    }

    #[must_use]
    pub fn shadow_helper(&self) -> Option<&ShadowCameraHelper> {
        self.shadow_helper.as_ref()
    }

    #[must_use]
    pub fn ground(&self) -> &GroundPlane {
        &self.ground
    }

    #[must_use]
    pub fn model(&self) -> Option<&Model> {
        self.model.as_ref()
    }

    #[must_use]
    pub fn animation(&self) -> Option<&AnimationController> {
        self.animation.as_ref()
    }

    pub fn animation_mut(&mut self) -> Option<&mut AnimationController> {
        self.animation.as_mut()
    }

    #[must_use]
    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    #[must_use]
    pub fn top_down_camera(&self) -> &PerspectiveCamera {
        &self.top_down_camera
    }

    #[must_use]
    pub fn walk(&self) -> Option<&Walk> {
        self.walk.as_ref()
    }

    #[must_use]
    pub fn split_view(&self) -> &SplitView {
        &self.split
    }

    /// Snapshot for [`crate::gui::ControlPanel::show`].
    #[must_use]
    pub fn panel_state(&self) -> PanelState<'_> {
        let (base_actions, current) = match &self.animation {
            Some(animation) => (
                animation
                    .base_actions()
                    .iter()
                    .map(|b| b.name.as_str())
                    .collect(),
                animation.current_base_action(),
            ),
            None => (Vec::new(), crate::animation::NO_ACTION),
        };
        PanelState {
            params: &self.params,
            base_actions,
            current_base_action: current,
        }
    }
}
