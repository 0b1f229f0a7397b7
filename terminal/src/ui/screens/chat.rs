//! # Chat Screen
//!
//! Header with the sign-in form, the conversation in the middle and the input
//! line at the bottom. The conversation scrolls to the newest message whenever
//! it grows; the send button is disabled while a reply is pending.

use crate::app::{App, ChatState, Message, Sender};
use crate::ui::theme::Theme;
use egui::{Align, Key, Layout, RichText};

#[derive(Default)]
struct Actions {
    send: bool,
    login: bool,
    logout: bool,
}

pub fn render(ctx: &egui::Context, app: &mut App, theme: &Theme) {
    let mut actions = Actions::default();

    {
        let mut state = app.state.write();

        egui::TopBottomPanel::top("chat_header").show(ctx, |ui| {
            render_header(ui, &mut state, theme, &mut actions);
        });

        egui::TopBottomPanel::bottom("chat_input").show(ctx, |ui| {
            render_input(ui, &mut state, &mut actions);
        });

        let grew = state.messages.len() > app.rendered_messages;
        app.rendered_messages = state.messages.len();

        egui::CentralPanel::default().show(ctx, |ui| {
            render_conversation(ui, &state, theme, grew);
        });

        if state.loading || state.login.pending {
            // Keep the spinner moving until the task repaints
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    } // Lock released before spawning tasks

    if actions.send {
        app.send(ctx);
    }
    if actions.login {
        app.login(ctx);
    }
    if actions.logout {
        app.logout();
    }
}

fn render_header(ui: &mut egui::Ui, state: &mut ChatState, theme: &Theme, actions: &mut Actions) {
    ui.add_space(4.0);
    ui.horizontal(|ui| {
        ui.heading(RichText::new("Chat").color(theme.accent).strong());

        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if let Some(session) = &state.session {
                if ui.button("Sign out").clicked() {
                    actions.logout = true;
                }
                let who = session.username.as_deref().unwrap_or("token");
                ui.colored_label(theme.dim, format!("Signed in ({who})"));
                return;
            }

            let form = &mut state.login;
            let ready = !form.pending && !form.username.trim().is_empty() && !form.password.is_empty();
            if ui.add_enabled(ready, egui::Button::new("Sign in")).clicked() {
                actions.login = true;
            }
            let password = ui.add(
                egui::TextEdit::singleline(&mut form.password)
                    .password(true)
                    .hint_text("password")
                    .desired_width(110.0),
            );
            if password.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) && ready {
                actions.login = true;
            }
            ui.add(
                egui::TextEdit::singleline(&mut form.username)
                    .hint_text("username")
                    .desired_width(110.0),
            );
            if form.pending {
                ui.spinner();
            }
        });
    });

    if let Some(error) = &state.login.error {
        ui.colored_label(theme.error, error);
    }
    ui.add_space(4.0);
}

fn render_input(ui: &mut egui::Ui, state: &mut ChatState, actions: &mut Actions) {
    ui.add_space(6.0);
    ui.horizontal(|ui| {
        let can_send = !state.loading && !state.input.trim().is_empty();
        let input_width = (ui.available_width() - 70.0).max(100.0);

        let response = ui.add(
            egui::TextEdit::singleline(&mut state.input)
                .hint_text("Type your message...")
                .desired_width(input_width),
        );

        if response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
            actions.send = can_send;
            response.request_focus();
        }

        if ui.add_enabled(can_send, egui::Button::new("Send")).clicked() {
            actions.send = true;
        }
    });
    ui.add_space(6.0);
}

fn render_conversation(ui: &mut egui::Ui, state: &ChatState, theme: &Theme, grew: bool) {
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            if state.messages.is_empty() {
                ui.add_space(20.0);
                ui.vertical_centered(|ui| {
                    ui.colored_label(theme.dim, "Say hello to start the conversation.");
                });
            }

            for message in &state.messages {
                message_bubble(ui, message, theme);
                ui.add_space(6.0);
            }

            if state.loading {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.colored_label(theme.dim, "Thinking...");
                });
            }

            if grew {
                ui.scroll_to_cursor(Some(Align::BOTTOM));
            }
        });
}

fn message_bubble(ui: &mut egui::Ui, message: &Message, theme: &Theme) {
    let (fill, align) = match message.sender {
        Sender::User => (theme.user_bubble, Align::Max),
        Sender::Bot => (theme.bot_bubble, Align::Min),
    };
    let max_width = ui.available_width() * 0.75;

    ui.with_layout(Layout::top_down(align), |ui| {
        egui::Frame::new()
            .fill(fill)
            .corner_radius(8.0)
            .inner_margin(egui::Margin::same(8))
            .show(ui, |ui| {
                ui.set_max_width(max_width);
                ui.label(&message.content);
                let time = message.timestamp.with_timezone(&chrono::Local).format("%H:%M");
                ui.label(RichText::new(time.to_string()).small().color(theme.dim));
            });
    });
}
