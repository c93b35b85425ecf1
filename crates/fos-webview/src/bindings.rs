//! Script Bindings
//!
//! Globals the content surface exposes to scripts: `console`,
//! `window.scrollTo`, `performance.now` and animation frames.

use std::fmt::Write;
use std::sync::{Arc, Mutex, MutexGuard};

use rquickjs::function::Rest;
use rquickjs::{Ctx, Function, Object, Value};

use crate::surface::SurfaceModel;

/// Animation frame queue, kept on the script side so callbacks stay
/// ordinary script functions
const FRAME_PRELUDE: &str = r#"
(function (global) {
  var frameQueue = [];
  var nextHandle = 1;
  global.requestAnimationFrame = function (callback) {
    var handle = nextHandle++;
    frameQueue.push({ handle: handle, callback: callback });
    return handle;
  };
  global.cancelAnimationFrame = function (handle) {
    frameQueue = frameQueue.filter(function (f) { return f.handle !== handle; });
  };
  global.__fosRunFrame = function (now) {
    var due = frameQueue;
    frameQueue = [];
    for (var i = 0; i < due.length; i++) {
      due[i].callback(now);
    }
    return frameQueue.length;
  };
  global.__fosPendingFrames = function () {
    return frameQueue.length;
  };
})(globalThis);
"#;

/// Install all surface globals
pub fn install(ctx: &Ctx, model: Arc<Mutex<SurfaceModel>>) -> Result<(), rquickjs::Error> {
    install_console(ctx)?;
    install_window(ctx, model.clone())?;
    install_performance(ctx, model)?;
    let _: Value = ctx.eval(FRAME_PRELUDE)?;
    Ok(())
}

pub(crate) fn lock(model: &Mutex<SurfaceModel>) -> MutexGuard<'_, SurfaceModel> {
    model.lock().unwrap_or_else(|e| e.into_inner())
}

/// console.* routed to tracing
fn install_console(ctx: &Ctx) -> Result<(), rquickjs::Error> {
    let console = Object::new(ctx.clone())?;

    for level in ["log", "info", "warn", "error", "debug"] {
        console.set(level, Function::new(ctx.clone(), move |_ctx: Ctx, args: Rest<Value>| {
            let line = format_args_line(&args.0);
            match level {
                "error" => tracing::error!("[JS] {}", line),
                "warn" => tracing::warn!("[JS] {}", line),
                "debug" => tracing::debug!("[JS] {}", line),
                _ => tracing::info!("[JS] {}", line),
            }
            Ok::<(), rquickjs::Error>(())
        })?)?;
    }

    ctx.globals().set("console", console)?;
    Ok(())
}

/// window.scrollTo(x, y)
fn install_window(ctx: &Ctx, model: Arc<Mutex<SurfaceModel>>) -> Result<(), rquickjs::Error> {
    let window = Object::new(ctx.clone())?;

    window.set("scrollTo", Function::new(ctx.clone(), move |_ctx: Ctx, args: Rest<Value>| -> Result<(), rquickjs::Error> {
        if let Some(y) = args.get(1).and_then(as_number) {
            lock(&model).scroll_to(y.round() as i32);
        }
        Ok(())
    })?)?;

    ctx.globals().set("window", window)?;
    Ok(())
}

/// performance.now() backed by the surface clock
fn install_performance(ctx: &Ctx, model: Arc<Mutex<SurfaceModel>>) -> Result<(), rquickjs::Error> {
    let performance = Object::new(ctx.clone())?;

    performance.set("now", Function::new(ctx.clone(), move |_ctx: Ctx, _args: Rest<Value>| -> Result<f64, rquickjs::Error> {
        Ok(lock(&model).clock_ms)
    })?)?;

    ctx.globals().set("performance", performance)?;
    Ok(())
}

pub(crate) fn as_number(value: &Value) -> Option<f64> {
    value.as_int().map(f64::from).or_else(|| value.as_float())
}

fn format_args_line(values: &[Value]) -> String {
    let mut out = String::new();
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        if value.is_undefined() {
            out.push_str("undefined");
        } else if value.is_null() {
            out.push_str("null");
        } else if let Some(b) = value.as_bool() {
            write!(out, "{}", b).ok();
        } else if let Some(n) = as_number(value) {
            write!(out, "{}", n).ok();
        } else if let Some(s) = value.as_string() {
            out.push_str(&s.to_string().unwrap_or_default());
        } else if value.is_function() {
            out.push_str("[Function]");
        } else {
            out.push_str("[Object]");
        }
    }
    out
}
