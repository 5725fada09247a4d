// Playback controller for the active channel.
//
// The media surface mirrors how a built-in media element behaves: the
// controller asks it to play/pause/seek, and the element reports what
// actually happened through a polled event queue. Controller state follows
// the events, never the request, so externally-caused transitions are
// reflected correctly. No frames are decoded anywhere; while playing, the
// element advances its clock from wall time.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::models::Channel;

/// Controls hide this long after the last pointer activity
const CONTROLS_HIDE_AFTER: Duration = Duration::from_secs(3);
/// Transport skip buttons seek by this much
const SKIP_STEP_SECS: f64 = 10.0;

/// Events surfaced by the media element
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    Play,
    Pause,
    TimeUpdate(f64),
    DurationChanged(f64),
}

/// Stand-in for a built-in media element: owns the playback clock and
/// reports state changes through events.
pub struct MediaElement {
    url: String,
    ready: bool,
    autoplay_pending: bool,
    playing: bool,
    muted: bool,
    volume: f32,
    current_time: f64,
    duration: Option<f64>,
    last_tick: Option<Instant>,
    events: VecDeque<MediaEvent>,
}

impl MediaElement {
    pub fn new() -> Self {
        Self {
            url: String::new(),
            ready: false,
            autoplay_pending: false,
            playing: false,
            muted: false,
            volume: 1.0,
            current_time: 0.0,
            duration: None,
            last_tick: None,
            events: VecDeque::new(),
        }
    }

    /// Attach a source and schedule autoplay. Live sources have no known
    /// duration; pass one only when the source declares it.
    pub fn load(&mut self, url: &str, duration: Option<f64>) {
        self.url = url.to_string();
        self.ready = false;
        self.playing = false;
        self.autoplay_pending = true;
        self.current_time = 0.0;
        self.duration = duration;
        self.last_tick = None;
        self.events.clear();
    }

    pub fn play(&mut self) {
        if !self.has_source() {
            return;
        }
        if !self.ready {
            self.autoplay_pending = true;
            return;
        }
        if !self.playing {
            self.playing = true;
            self.events.push_back(MediaEvent::Play);
        }
    }

    pub fn pause(&mut self) {
        self.autoplay_pending = false;
        if self.playing {
            self.playing = false;
            self.events.push_back(MediaEvent::Pause);
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Jump the clock. No bounds check against the duration, matching the
    /// element this stands in for.
    pub fn seek(&mut self, time: f64) {
        self.current_time = time;
        self.events.push_back(MediaEvent::TimeUpdate(time));
    }

    /// Advance the element. A source-less element never becomes ready and
    /// never advances; playback failure is silent.
    pub fn tick(&mut self, now: Instant) {
        if !self.has_source() {
            return;
        }
        if !self.ready {
            self.ready = true;
            self.last_tick = Some(now);
            if let Some(duration) = self.duration {
                self.events.push_back(MediaEvent::DurationChanged(duration));
            }
            if self.autoplay_pending {
                self.autoplay_pending = false;
                self.playing = true;
                self.events.push_back(MediaEvent::Play);
            }
            return;
        }

        let prev = self.last_tick.replace(now);
        if let Some(prev) = prev {
            let dt = now.saturating_duration_since(prev).as_secs_f64();
            if self.playing && dt > 0.0 {
                self.current_time += dt;
                self.events.push_back(MediaEvent::TimeUpdate(self.current_time));
            }
        }
    }

    /// Drain pending events
    pub fn poll_events(&mut self) -> Vec<MediaEvent> {
        self.events.drain(..).collect()
    }

    fn has_source(&self) -> bool {
        !self.url.is_empty()
    }
}

/// Playback phases of an active controller. Idle is the absence of a
/// controller; closing is teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPhase {
    Loading,
    Playing,
    Paused,
}

/// Shell-level requests emitted by the player UI
#[derive(Default)]
pub struct PlayerResponse {
    pub close_requested: bool,
    pub fullscreen: Option<bool>,
}

/// Owns the media element and the transient playback state for exactly one
/// channel. Created on channel selection, dropped on close or switch.
pub struct PlayerController {
    channel: Channel,
    media: MediaElement,
    phase: PlaybackPhase,
    is_muted: bool,
    volume: u8,
    current_time: f64,
    duration: Option<f64>,
    is_fullscreen: bool,
    controls_visible: bool,
    hide_deadline: Option<Instant>,
    pointer_inside: bool,
}

impl PlayerController {
    pub fn new(channel: Channel, now: Instant) -> Self {
        let mut media = MediaElement::new();
        media.load(&channel.url, None);
        media.set_volume(1.0);
        Self {
            channel,
            media,
            phase: PlaybackPhase::Loading,
            is_muted: false,
            volume: 100,
            current_time: 0.0,
            duration: None,
            is_fullscreen: false,
            controls_visible: true,
            hide_deadline: Some(now + CONTROLS_HIDE_AFTER),
            pointer_inside: false,
        }
    }

    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == PlaybackPhase::Playing
    }

    pub fn is_muted(&self) -> bool {
        self.is_muted
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    pub fn is_fullscreen(&self) -> bool {
        self.is_fullscreen
    }

    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    /// Tick the element and mirror its events into controller state, then
    /// expire the controls-hide timer.
    pub fn update(&mut self, now: Instant) {
        self.media.tick(now);
        for event in self.media.poll_events() {
            match event {
                MediaEvent::Play => self.phase = PlaybackPhase::Playing,
                MediaEvent::Pause => self.phase = PlaybackPhase::Paused,
                MediaEvent::TimeUpdate(time) => self.current_time = time,
                MediaEvent::DurationChanged(duration) => self.duration = Some(duration),
            }
        }

        if let Some(deadline) = self.hide_deadline {
            if now >= deadline {
                self.controls_visible = false;
                self.hide_deadline = None;
            }
        }
    }

    pub fn toggle_play(&mut self) {
        if self.is_playing() {
            self.media.pause();
        } else {
            self.media.play();
        }
    }

    /// Clamps to 0..=100. Zero mutes as a side effect; anything audible
    /// unmutes.
    pub fn set_volume(&mut self, volume: i32) {
        let volume = volume.clamp(0, 100) as u8;
        self.volume = volume;
        self.media.set_volume(f32::from(volume) / 100.0);
        let muted = volume == 0;
        self.media.set_muted(muted);
        self.is_muted = muted;
    }

    pub fn toggle_mute(&mut self) {
        let muted = !self.media.is_muted();
        self.media.set_muted(muted);
        self.is_muted = muted;
    }

    /// Unclamped, like the element underneath; out-of-range targets are the
    /// caller's problem.
    pub fn seek(&mut self, time: f64) {
        self.media.seek(time);
        self.current_time = time;
    }

    pub fn skip_back(&mut self) {
        self.seek((self.current_time - SKIP_STEP_SECS).max(0.0));
    }

    pub fn skip_forward(&mut self) {
        self.seek(self.current_time + SKIP_STEP_SECS);
    }

    /// Optimistic: the flag flips whether or not the window system honors
    /// the request.
    pub fn toggle_fullscreen(&mut self) -> bool {
        self.is_fullscreen = !self.is_fullscreen;
        self.is_fullscreen
    }

    /// Pointer activity: show controls and rearm the single-shot hide timer.
    pub fn notify_activity(&mut self, now: Instant) {
        self.controls_visible = true;
        self.hide_deadline = Some(now + CONTROLS_HIDE_AFTER);
    }

    /// Pointer entered the player: show controls without arming the timer.
    pub fn show_controls(&mut self) {
        self.controls_visible = true;
    }

    /// Pointer left the player: hide immediately and cancel the timer.
    pub fn hide_controls(&mut self) {
        self.controls_visible = false;
        self.hide_deadline = None;
    }

    #[cfg(test)]
    pub(crate) fn media_mut(&mut self) -> &mut MediaElement {
        &mut self.media
    }
}

impl Drop for PlayerController {
    fn drop(&mut self) {
        self.media.pause();
    }
}

/// `m:ss` display, seconds zero-padded
pub fn format_time(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

impl PlayerController {
    /// Render the playback overlay: dark video surface with identity chrome,
    /// plus the transport strip while controls are visible.
    pub fn show(&mut self, ui: &mut egui::Ui) -> PlayerResponse {
        let mut out = PlayerResponse::default();
        let now = Instant::now();

        let width = ui.available_width();
        let height = (width * 9.0 / 16.0).min(420.0);
        let (rect, surface) =
            ui.allocate_exact_size(egui::vec2(width, height), egui::Sense::click());

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, egui::CornerRadius::same(6), egui::Color32::from_rgb(10, 10, 16));

        if surface.clicked() {
            self.toggle_play();
        }

        // mouseenter / mousemove / mouseleave over surface plus strip
        let strip_height = if self.controls_visible { 64.0 } else { 0.0 };
        let hover_rect = egui::Rect::from_min_max(
            rect.min,
            egui::pos2(rect.max.x, rect.max.y + strip_height),
        );
        let inside = ui.rect_contains_pointer(hover_rect);
        if inside {
            if !self.pointer_inside {
                self.show_controls();
            }
            if ui.input(|i| i.pointer.is_moving()) {
                self.notify_activity(now);
            }
        } else if self.pointer_inside {
            self.hide_controls();
        }
        self.pointer_inside = inside;

        if self.controls_visible {
            self.show_identity_bar(ui, &painter, rect, &mut out);
            self.show_center_state(ui, rect);
            ui.add_space(4.0);
            self.show_transport_strip(ui, width, &mut out);
        }

        out
    }

    fn show_identity_bar(
        &mut self,
        ui: &mut egui::Ui,
        painter: &egui::Painter,
        rect: egui::Rect,
        out: &mut PlayerResponse,
    ) {
        let top_left = rect.left_top() + egui::vec2(12.0, 10.0);

        // logo slot: the catalog carries artwork URLs but nothing fetches
        // them, so the slot renders the way a broken image does
        let logo_rect = egui::Rect::from_min_size(top_left, egui::vec2(28.0, 28.0));
        painter.rect_filled(logo_rect, egui::CornerRadius::same(4), egui::Color32::from_gray(40));
        let glyph = if self.channel.logo.is_some() { "🖼" } else { "▶" };
        painter.text(
            logo_rect.center(),
            egui::Align2::CENTER_CENTER,
            glyph,
            egui::FontId::proportional(13.0),
            egui::Color32::from_gray(140),
        );

        painter.text(
            top_left + egui::vec2(36.0, 2.0),
            egui::Align2::LEFT_TOP,
            &self.channel.name,
            egui::FontId::proportional(14.0),
            egui::Color32::WHITE,
        );
        painter.text(
            top_left + egui::vec2(36.0, 18.0),
            egui::Align2::LEFT_TOP,
            &self.channel.category,
            egui::FontId::proportional(11.0),
            egui::Color32::from_gray(180),
        );

        let live_pos = top_left + egui::vec2(140.0, 14.0);
        painter.circle_filled(live_pos, 3.5, egui::Color32::from_rgb(220, 50, 50));
        painter.text(
            live_pos + egui::vec2(8.0, 0.0),
            egui::Align2::LEFT_CENTER,
            "LIVE",
            egui::FontId::proportional(11.0),
            egui::Color32::WHITE,
        );

        let close_rect = egui::Rect::from_min_size(
            egui::pos2(rect.right() - 36.0, rect.top() + 8.0),
            egui::vec2(26.0, 26.0),
        );
        if ui.put(close_rect, egui::Button::new("✕")).clicked() {
            out.close_requested = true;
        }
    }

    fn show_center_state(&mut self, ui: &mut egui::Ui, rect: egui::Rect) {
        match self.phase {
            PlaybackPhase::Loading => {
                let spinner_rect = egui::Rect::from_center_size(rect.center(), egui::vec2(32.0, 32.0));
                ui.put(spinner_rect, egui::Spinner::new().size(32.0));
            }
            PlaybackPhase::Paused => {
                let play_rect = egui::Rect::from_center_size(rect.center(), egui::vec2(56.0, 56.0));
                if ui
                    .put(play_rect, egui::Button::new(egui::RichText::new("▶").size(24.0)))
                    .clicked()
                {
                    self.toggle_play();
                }
            }
            PlaybackPhase::Playing => {}
        }
    }

    fn show_transport_strip(&mut self, ui: &mut egui::Ui, width: f32, out: &mut PlayerResponse) {
        // zero-width progress while the duration is unknown
        let fraction = match self.duration {
            Some(duration) if duration > 0.0 => (self.current_time / duration) as f32,
            _ => 0.0,
        };
        let bar = ui
            .add(egui::ProgressBar::new(fraction.clamp(0.0, 1.0)).desired_width(width))
            .interact(egui::Sense::click());
        if bar.clicked() {
            if let (Some(pos), Some(duration)) = (bar.interact_pointer_pos(), self.duration) {
                if duration > 0.0 && bar.rect.width() > 0.0 {
                    let fraction = ((pos.x - bar.rect.left()) / bar.rect.width()).clamp(0.0, 1.0);
                    self.seek(f64::from(fraction) * duration);
                }
            }
        }

        ui.horizontal(|ui| {
            let play_glyph = if self.is_playing() { "⏸" } else { "▶" };
            if ui.button(play_glyph).clicked() {
                self.toggle_play();
            }
            if ui.button("⏮").clicked() {
                self.skip_back();
            }
            if ui.button("⏭").clicked() {
                self.skip_forward();
            }

            let mute_glyph = if self.is_muted { "🔇" } else { "🔊" };
            if ui.button(mute_glyph).clicked() {
                self.toggle_mute();
            }
            let mut volume = i32::from(self.volume);
            if ui
                .add(egui::Slider::new(&mut volume, 0..=100).show_value(false))
                .changed()
            {
                self.set_volume(volume);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let fullscreen_glyph = if self.is_fullscreen() { "🗗" } else { "⛶" };
                if ui.button(fullscreen_glyph).clicked() {
                    out.fullscreen = Some(self.toggle_fullscreen());
                }
                let shown_duration = self.duration.unwrap_or(0.0);
                ui.label(
                    egui::RichText::new(format!(
                        "{} / {}",
                        format_time(self.current_time),
                        format_time(shown_duration)
                    ))
                    .weak(),
                );
            });
        });
    }
}

#[cfg(test)]
#[path = "player_tests.rs"]
mod tests;
