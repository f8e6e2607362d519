use greenquest_core::ParticleField;
use std::f64::consts::TAU;
use web_sys::CanvasRenderingContext2d;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub seed: u64,
}

/// Clear, wash with the backdrop gradient, then draw each particle.
pub fn draw(ctx: &CanvasRenderingContext2d, field: &ParticleField) {
    let (width, height) = field.size();
    ctx.clear_rect(0.0, 0.0, width, height);
    let wash = ctx.create_linear_gradient(0.0, 0.0, width, height);
    let _ = wash.add_color_stop(0.0, "rgba(3,6,12,0.0)");
    let _ = wash.add_color_stop(1.0, "rgba(3,6,12,0.2)");
    ctx.set_fill_style_canvas_gradient(&wash);
    ctx.fill_rect(0.0, 0.0, width, height);

    for p in field.particles() {
        ctx.begin_path();
        let _ = ctx.arc(p.x, p.y, p.radius, 0.0, TAU);
        ctx.set_fill_style_str(&p.fill_style());
        ctx.fill();
    }
}

mod animation {
    use super::draw;
    use gloo::events::EventListener;
    use gloo::render::{AnimationFrame, request_animation_frame};
    use greenquest_core::ParticleField;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

    pub struct Animation {
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        field: RefCell<ParticleField>,
        frame: RefCell<Option<AnimationFrame>>,
        resize: RefCell<Option<EventListener>>,
        stopped: Cell<bool>,
    }

    impl Animation {
        pub fn start(canvas: HtmlCanvasElement, seed: u64) -> Option<Rc<Self>> {
            let ctx = canvas
                .get_context("2d")
                .ok()
                .flatten()?
                .dyn_into::<CanvasRenderingContext2d>()
                .ok()?;
            let (width, height) = crate::dom::viewport_size().unwrap_or((0.0, 0.0));
            let anim = Rc::new(Self {
                canvas,
                ctx,
                field: RefCell::new(ParticleField::seeded(width, height, seed)),
                frame: RefCell::new(None),
                resize: RefCell::new(None),
                stopped: Cell::new(false),
            });
            anim.fit_canvas();

            if let Some(win) = crate::dom::window() {
                let weak = Rc::downgrade(&anim);
                let listener = EventListener::new(&win, "resize", move |_| {
                    if let Some(anim) = weak.upgrade() {
                        anim.on_resize();
                    }
                });
                *anim.resize.borrow_mut() = Some(listener);
            }
            anim.tick();
            Some(anim)
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        fn fit_canvas(&self) {
            let (width, height) = self.field.borrow().size();
            self.canvas.set_width(width as u32);
            self.canvas.set_height(height as u32);
        }

        fn on_resize(&self) {
            if let Some((width, height)) = crate::dom::viewport_size() {
                self.field.borrow_mut().resize(width, height);
                self.fit_canvas();
            }
        }

        fn tick(self: &Rc<Self>) {
            if self.stopped.get() {
                return;
            }
            {
                let mut field = self.field.borrow_mut();
                field.step();
                draw(&self.ctx, &field);
            }
            let next = Rc::clone(self);
            let handle = request_animation_frame(move |_| next.tick());
            *self.frame.borrow_mut() = Some(handle);
        }

        /// Cancel the pending frame and drop the resize listener.
        pub fn stop(&self) {
            self.stopped.set(true);
            self.frame.borrow_mut().take();
            self.resize.borrow_mut().take();
        }
    }
}

/// Decorative background. Nothing drawn here reads or writes game state.
#[function_component(ParticleCanvas)]
pub fn particle_canvas(props: &Props) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with(props.seed, move |seed| {
            let running = canvas_ref
                .cast::<web_sys::HtmlCanvasElement>()
                .and_then(|canvas| animation::Animation::start(canvas, *seed));
            move || {
                if let Some(anim) = running {
                    anim.stop();
                }
            }
        });
    }

    html! {
        <canvas id="bgCanvas" class="bg-canvas" aria-hidden="true" ref={canvas_ref}></canvas>
    }
}
