//! Main application orchestrator.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEvent};
use futures_util::StreamExt;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::application::{
    ProductCatalog, RestoreSessionUseCase, SignInResponse, SignInUseCase, SignOutUseCase,
    SignUpResponse, SignUpUseCase,
};
use crate::domain::errors::{AuthError, MediaError};
use crate::domain::ports::{AuthPort, MediaPickerPort, PickedImage, SessionStoragePort};
use crate::domain::{ImageRef, PasswordPolicy};
use crate::infrastructure::config::{AppConfig, ProfileConfig};
use crate::presentation::events::EventHandler;
use crate::presentation::navigation::{NavigationError, Route, Router};
use crate::presentation::theme::Theme;
use crate::presentation::ui::{
    HomeAction, HomeScreen, LoginAction, LoginScreen, ProductFormAction, ProductFormMode,
    ProductFormScreen, ProductsAction, ProductsScreen, ProductsView, ProfileAction,
    ProfileScreen, SignUpAction, SignUpScreen,
};

#[derive(Debug)]
enum Action {
    SignInFinished {
        seq: u64,
        result: Result<SignInResponse, AuthError>,
    },
    SignUpFinished {
        seq: u64,
        result: Result<SignUpResponse, AuthError>,
    },
    SignOutFinished {
        seq: u64,
        result: Result<(), AuthError>,
    },
}

impl Action {
    const fn seq(&self) -> u64 {
        match self {
            Self::SignInFinished { seq, .. }
            | Self::SignUpFinished { seq, .. }
            | Self::SignOutFinished { seq, .. } => *seq,
        }
    }
}

/// Work the event loop must do with the terminal after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyOutcome {
    Continue,
    PickImage,
}

enum CurrentScreen {
    Login(LoginScreen),
    SignUp(SignUpScreen),
    Home(HomeScreen),
    Products(ProductsScreen),
    ProductForm(ProductFormScreen),
    Profile(ProfileScreen),
}

impl CurrentScreen {
    fn route(&self) -> Route {
        match self {
            Self::Login(_) => Route::Login,
            Self::SignUp(_) => Route::SignUp,
            Self::Home(_) => Route::Home,
            Self::Products(_) => Route::Products,
            Self::ProductForm(form) => match form.mode() {
                ProductFormMode::Add => Route::AddProduct,
                ProductFormMode::Edit(id) => Route::EditProduct(id),
            },
            Self::Profile(_) => Route::Profile,
        }
    }
}

/// Owns the router, the catalog and the current screen, and drives the
/// authentication use cases in background tasks.
pub struct App {
    theme: Theme,
    remember_session: bool,
    policy: PasswordPolicy,
    profile: ProfileConfig,
    router: Router,
    screen: CurrentScreen,
    catalog: ProductCatalog,
    sign_in: SignInUseCase,
    sign_up: SignUpUseCase,
    sign_out: SignOutUseCase,
    restore_session: RestoreSessionUseCase,
    media_picker: Arc<dyn MediaPickerPort>,
    avatar: Option<ImageRef>,
    request_seq: u64,
    in_flight: Option<u64>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    running: bool,
}

impl App {
    /// Creates the application from configuration and adapters.
    #[must_use]
    pub fn new(
        config: &AppConfig,
        auth_port: Arc<dyn AuthPort>,
        storage_port: Arc<dyn SessionStoragePort>,
        media_picker: Arc<dyn MediaPickerPort>,
    ) -> Self {
        let theme = Theme::new(&config.theme.accent_color);
        let policy = config.password.policy();
        let router = Router::new(
            auth_port.subscribe(),
            Duration::from_millis(config.session.settle_delay_ms),
        );
        let catalog = if config.catalog.seed_demo_products {
            ProductCatalog::seeded()
        } else {
            ProductCatalog::new()
        };
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        Self {
            theme,
            remember_session: config.session.remember,
            policy: policy.clone(),
            profile: config.profile.clone(),
            router,
            screen: CurrentScreen::Login(LoginScreen::new(theme, config.session.remember)),
            catalog,
            sign_in: SignInUseCase::new(auth_port.clone(), storage_port.clone()),
            sign_up: SignUpUseCase::new(auth_port.clone(), policy),
            sign_out: SignOutUseCase::new(auth_port.clone(), storage_port.clone()),
            restore_session: RestoreSessionUseCase::new(auth_port, storage_port),
            media_picker,
            avatar: None,
            request_seq: 0,
            in_flight: None,
            action_tx,
            action_rx,
            running: true,
        }
    }

    /// Runs the application until the user quits.
    ///
    /// # Errors
    /// Returns error if the terminal fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        terminal.draw(|frame| self.render(frame))?;

        let restore_error = self.restore().await;
        let route = self.router.start();
        info!(%route, "Initial route");
        self.sync_screen();

        if let Some(err) = restore_error
            && let CurrentScreen::Login(screen) = &mut self.screen
        {
            screen.on_sign_in_result(Err(err));
        }

        self.run_event_loop(terminal).await?;

        info!("Application exiting normally");
        Ok(())
    }

    async fn restore(&mut self) -> Option<AuthError> {
        if !self.remember_session {
            debug!("Session persistence disabled, skipping restore");
            return None;
        }
        match self.restore_session.execute().await {
            Ok(Some(response)) => {
                info!(uid = %response.user.uid, source = %response.source, "Session restored");
                None
            }
            Ok(None) => {
                debug!("No session to restore");
                None
            }
            Err(e) => {
                warn!(error = %e, "Session restore failed");
                Some(e)
            }
        }
    }

    async fn run_event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();

        terminal.draw(|frame| self.render(frame))?;

        while self.running {
            tokio::select! {
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                }

                Some(user) = self.router.next_change() => {
                    if self.router.commit(user) {
                        self.sync_screen();
                    }
                }

                Some(event) = terminal_events.next() => {
                    match event {
                        Ok(Event::Key(key)) => {
                            if self.handle_key(key) == KeyOutcome::PickImage {
                                self.handle_pick_image(terminal).await?;
                            }
                        }
                        Ok(_) => {}
                        Err(e) => {
                            error!(error = %e, "Terminal event stream failed");
                            return Err(e.into());
                        }
                    }
                }
            }
            terminal.draw(|frame| self.render(frame))?;
        }

        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        match &self.screen {
            CurrentScreen::Login(screen) => frame.render_widget(screen, area),
            CurrentScreen::SignUp(screen) => frame.render_widget(screen, area),
            CurrentScreen::Home(screen) => frame.render_widget(screen, area),
            CurrentScreen::Products(screen) => {
                frame.render_widget(ProductsView::new(screen, &self.catalog), area);
            }
            CurrentScreen::ProductForm(screen) => frame.render_widget(screen, area),
            CurrentScreen::Profile(screen) => frame.render_widget(screen, area),
        }
    }

    fn build_screen(&mut self, route: Route) -> CurrentScreen {
        match route {
            Route::Login => {
                CurrentScreen::Login(LoginScreen::new(self.theme, self.remember_session))
            }
            Route::SignUp => {
                CurrentScreen::SignUp(SignUpScreen::new(self.theme, self.policy.clone()))
            }
            Route::Home => CurrentScreen::Home(HomeScreen::new(self.theme, self.router.user())),
            Route::Products => CurrentScreen::Products(ProductsScreen::new(self.theme)),
            Route::AddProduct => CurrentScreen::ProductForm(ProductFormScreen::add(self.theme)),
            Route::EditProduct(id) => {
                if let Some(product) = self.catalog.get(id) {
                    return CurrentScreen::ProductForm(ProductFormScreen::edit(self.theme, product));
                }
                warn!(%id, "Edited product no longer exists");
                if self.router.back().is_err()
                    && let Err(e) = self.router.reset(Route::Login)
                {
                    warn!(error = %e, "Failed to leave stale edit route");
                }
                let fallback = self.router.current();
                self.build_screen(fallback)
            }
            Route::Profile => CurrentScreen::Profile(ProfileScreen::new(
                self.theme,
                self.router.user().cloned(),
                self.avatar.clone(),
                self.profile.clone(),
            )),
        }
    }

    /// Rebuilds the screen when the router moved. Pending results of the old
    /// screen are dropped.
    fn sync_screen(&mut self) {
        let route = self.router.current();
        if self.screen.route() == route {
            return;
        }
        debug!(from = %self.screen.route(), to = %route, "Switching screen");
        let previous = self.screen.route();
        self.in_flight = None;
        self.screen = self.build_screen(route);

        if let (Route::EditProduct(id), CurrentScreen::Products(screen)) =
            (previous, &mut self.screen)
        {
            screen.select(&self.catalog, id);
        }
    }

    fn navigate(&mut self, result: Result<(), NavigationError>) {
        if let Err(e) = result {
            warn!(error = %e, "Navigation refused");
        }
        self.sync_screen();
    }

    fn go_back(&mut self) {
        let result = self.router.back().map(|_| ());
        self.navigate(result);
    }

    fn next_request(&mut self) -> u64 {
        self.request_seq += 1;
        self.in_flight = Some(self.request_seq);
        self.request_seq
    }

    fn send(tx: &mpsc::UnboundedSender<Action>, action: Action) {
        if tx.send(action).is_err() {
            debug!("Action channel closed, dropping result");
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if !EventHandler::is_press(&key) {
            return KeyOutcome::Continue;
        }
        if EventHandler::is_quit_event(&key) {
            info!("Quit requested");
            self.running = false;
            return KeyOutcome::Continue;
        }

        match &mut self.screen {
            CurrentScreen::Login(screen) => {
                let action = screen.handle_key(key);
                self.on_login_action(action);
            }
            CurrentScreen::SignUp(screen) => {
                let action = screen.handle_key(key);
                self.on_sign_up_action(action);
            }
            CurrentScreen::Home(screen) => {
                let action = screen.handle_key(key);
                self.on_home_action(action);
            }
            CurrentScreen::Products(screen) => {
                let action = screen.handle_key(key, &self.catalog);
                self.on_products_action(action);
            }
            CurrentScreen::ProductForm(screen) => {
                let action = screen.handle_key(key);
                return self.on_product_form_action(action);
            }
            CurrentScreen::Profile(screen) => {
                let action = screen.handle_key(key);
                return self.on_profile_action(action);
            }
        }
        KeyOutcome::Continue
    }

    fn on_login_action(&mut self, action: LoginAction) {
        match action {
            LoginAction::None => {}
            LoginAction::Submit => self.submit_sign_in(),
            LoginAction::OpenSignUp => {
                let result = self.router.push(Route::SignUp);
                self.navigate(result);
            }
            LoginAction::GoHome => {
                let result = self.router.reset(Route::Home);
                self.navigate(result);
            }
            LoginAction::Quit => self.running = false,
        }
    }

    fn submit_sign_in(&mut self) {
        let CurrentScreen::Login(screen) = &mut self.screen else {
            return;
        };
        let request = screen.request();
        if let Err(e) = SignInUseCase::validate(&request) {
            screen.on_sign_in_result(Err(e.into()));
            return;
        }
        screen.set_busy(true);

        let seq = self.next_request();
        let use_case = self.sign_in.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = use_case.execute(request).await;
            Self::send(&tx, Action::SignInFinished { seq, result });
        });
    }

    fn on_sign_up_action(&mut self, action: SignUpAction) {
        match action {
            SignUpAction::None => {}
            SignUpAction::Submit => self.submit_sign_up(),
            SignUpAction::GoLogin if self.router.can_go_back() => self.go_back(),
            SignUpAction::GoLogin => {
                let result = self.router.reset(Route::Login);
                self.navigate(result);
            }
        }
    }

    fn submit_sign_up(&mut self) {
        let CurrentScreen::SignUp(screen) = &mut self.screen else {
            return;
        };
        let request = screen.request();
        if let Err(e) = self.sign_up.validate(&request) {
            debug!(error = %e, "Sign-up form rejected");
            screen.on_sign_up_result(Err(e.into()));
            return;
        }
        screen.set_busy(true);

        let seq = self.next_request();
        let use_case = self.sign_up.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = use_case.execute(request).await;
            Self::send(&tx, Action::SignUpFinished { seq, result });
        });
    }

    fn on_home_action(&mut self, action: HomeAction) {
        match action {
            HomeAction::None => {}
            HomeAction::OpenProducts => {
                let result = self.router.push(Route::Products);
                self.navigate(result);
            }
            HomeAction::OpenProfile => {
                let result = self.router.replace(Route::Profile);
                self.navigate(result);
            }
            HomeAction::SignOut => self.submit_sign_out(),
        }
    }

    fn submit_sign_out(&mut self) {
        let seq = self.next_request();
        let use_case = self.sign_out.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = use_case.execute().await;
            Self::send(&tx, Action::SignOutFinished { seq, result });
        });
    }

    fn on_products_action(&mut self, action: ProductsAction) {
        match action {
            ProductsAction::None => {}
            ProductsAction::Add => {
                let result = self.router.push(Route::AddProduct);
                self.navigate(result);
            }
            ProductsAction::Edit(id) => {
                let result = self.router.push(Route::EditProduct(id));
                self.navigate(result);
            }
            ProductsAction::Delete(id) => {
                let result = self.catalog.remove(id);
                if let CurrentScreen::Products(screen) = &mut self.screen {
                    screen.on_catalog_result(&self.catalog, result);
                }
            }
            ProductsAction::Back => self.go_back(),
        }
    }

    fn on_product_form_action(&mut self, action: ProductFormAction) -> KeyOutcome {
        match action {
            ProductFormAction::None => {}
            ProductFormAction::Save => {
                let CurrentScreen::ProductForm(screen) = &mut self.screen else {
                    return KeyOutcome::Continue;
                };
                let draft = screen.draft();
                let result = match screen.mode() {
                    ProductFormMode::Add => self.catalog.add(&draft),
                    ProductFormMode::Edit(id) => self.catalog.update(id, &draft),
                };
                screen.on_save_result(result);
            }
            ProductFormAction::PickImage => return KeyOutcome::PickImage,
            ProductFormAction::Back => self.go_back(),
        }
        KeyOutcome::Continue
    }

    fn on_profile_action(&mut self, action: ProfileAction) -> KeyOutcome {
        match action {
            ProfileAction::None => {}
            ProfileAction::ChangePhoto => return KeyOutcome::PickImage,
            ProfileAction::GoHome => {
                let result = self.router.replace(Route::Home);
                self.navigate(result);
            }
            ProfileAction::SignOut => self.submit_sign_out(),
        }
        KeyOutcome::Continue
    }

    fn handle_action(&mut self, action: Action) {
        if self.in_flight != Some(action.seq()) {
            debug!(seq = action.seq(), "Discarding result for inactive screen");
            return;
        }
        self.in_flight = None;

        match action {
            Action::SignInFinished { result, .. } => {
                if let Ok(response) = &result {
                    self.router.commit(Some(response.user.clone()));
                }
                if let CurrentScreen::Login(screen) = &mut self.screen {
                    screen.on_sign_in_result(result);
                }
            }
            Action::SignUpFinished { result, .. } => {
                if let Ok(response) = &result {
                    info!(email = %response.email, "Account registered");
                }
                if let CurrentScreen::SignUp(screen) = &mut self.screen {
                    screen.on_sign_up_result(result);
                }
            }
            Action::SignOutFinished { result, .. } => {
                let signed_out = result.is_ok();
                match &mut self.screen {
                    CurrentScreen::Home(screen) => screen.on_sign_out_result(result),
                    CurrentScreen::Profile(screen) => screen.on_sign_out_result(result),
                    _ => {}
                }
                if signed_out {
                    self.avatar = None;
                    self.router.commit(None);
                }
            }
        }
        self.sync_screen();
    }

    async fn pick_image(
        &self,
        terminal: &mut DefaultTerminal,
    ) -> color_eyre::Result<Result<Option<PickedImage>, MediaError>> {
        debug!("Opening media picker");

        crossterm::terminal::disable_raw_mode()?;
        crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        )?;

        let result = self.media_picker.pick_image().await;

        crossterm::terminal::enable_raw_mode()?;
        crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::EnterAlternateScreen,
            crossterm::cursor::Hide
        )?;

        terminal.clear()?;

        match &result {
            Ok(Some(picked)) => info!(
                path = %picked.path.display(),
                width = picked.width,
                height = picked.height,
                "Image picked"
            ),
            Ok(None) => debug!("Media picker cancelled"),
            Err(e) => warn!(error = %e, "Media picker failed"),
        }
        Ok(result)
    }

    async fn handle_pick_image(
        &mut self,
        terminal: &mut DefaultTerminal,
    ) -> color_eyre::Result<()> {
        let result = self.pick_image(terminal).await?;
        match &mut self.screen {
            CurrentScreen::ProductForm(screen) => screen.on_image_picked(result),
            CurrentScreen::Profile(screen) => {
                screen.on_avatar_picked(result);
                self.avatar = screen.avatar().cloned();
            }
            _ => debug!("Screen changed while picking, dropping image"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ActiveModal;
    use crate::domain::{Price, Product, ProductId};
    use crate::domain::UserProfile;
    use crate::domain::ports::MockMediaPickerPort;
    use crate::domain::ports::mocks::{MockAuthPort, MockSessionStorage};
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app(auth: &Arc<MockAuthPort>) -> App {
        let mut app = App::new(
            &AppConfig::default(),
            auth.clone(),
            Arc::new(MockSessionStorage::new()),
            Arc::new(MockMediaPickerPort::new()),
        );
        app.router.start();
        app.sync_screen();
        app
    }

    fn signed_in_app() -> (Arc<MockAuthPort>, App) {
        let auth = Arc::new(MockAuthPort::new().with_display_name("Ana"));
        auth.watch()
            .publish(Some(UserProfile::new("u1", "ana@pchela.com").with_display_name("Ana")));
        let app = app(&auth);
        (auth, app)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn modal_message(app: &App) -> Option<String> {
        let active = match &app.screen {
            CurrentScreen::Login(s) => s.modals().active(),
            CurrentScreen::SignUp(s) => s.modals().active(),
            CurrentScreen::Home(s) => s.modals().active(),
            CurrentScreen::Products(s) => s.modals().active(),
            CurrentScreen::ProductForm(s) => s.modals().active(),
            CurrentScreen::Profile(s) => s.modals().active(),
        };
        active.map(|modal: ActiveModal<'_>| modal.message().to_string())
    }

    async fn next_action(app: &mut App) {
        let action = app.action_rx.recv().await.unwrap();
        app.handle_action(action);
    }

    #[tokio::test]
    async fn test_starts_on_login_when_signed_out() {
        let auth = Arc::new(MockAuthPort::new());
        let app = app(&auth);
        assert_eq!(app.screen.route(), Route::Login);
    }

    #[tokio::test]
    async fn test_empty_login_never_calls_provider() {
        let auth = Arc::new(MockAuthPort::new());
        let mut app = app(&auth);

        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(
            modal_message(&app).as_deref(),
            Some("Por favor ingrese ambos campos.")
        );
        assert!(app.in_flight.is_none());
        assert!(auth.calls().is_empty());
    }

    #[tokio::test]
    async fn test_login_then_acknowledge_goes_home() {
        let auth = Arc::new(MockAuthPort::new().with_display_name("Ana"));
        let mut app = app(&auth);

        type_text(&mut app, "ana@pchela.com");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "Secreta1");
        app.handle_key(key(KeyCode::Enter));
        next_action(&mut app).await;

        assert_eq!(app.screen.route(), Route::Login);
        assert_eq!(modal_message(&app).as_deref(), Some("Te logueaste como Ana"));

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.screen.route(), Route::Home);
        assert_eq!(auth.calls(), vec!["sign_in"]);
    }

    #[tokio::test]
    async fn test_result_for_left_screen_is_discarded() {
        let auth = Arc::new(MockAuthPort::new().fail_sign_in("auth/wrong-password"));
        let mut app = app(&auth);

        type_text(&mut app, "ana@pchela.com");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "mala");
        app.handle_key(key(KeyCode::Enter));

        let action = app.action_rx.recv().await.unwrap();
        app.router.push(Route::SignUp).unwrap();
        app.sync_screen();
        app.handle_action(action);

        assert_eq!(app.screen.route(), Route::SignUp);
        assert_eq!(modal_message(&app), None);
    }

    #[tokio::test]
    async fn test_add_product_flow() {
        let (_auth, mut app) = signed_in_app();
        assert_eq!(app.screen.route(), Route::Home);

        for _ in 0..4 {
            app.handle_key(key(KeyCode::Down));
        }
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.screen.route(), Route::Products);

        app.handle_key(key(KeyCode::Char('a')));
        assert_eq!(app.screen.route(), Route::AddProduct);
        type_text(&mut app, "Tijera");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "15000");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "20");
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.catalog.len(), 6);
        assert_eq!(
            app.catalog.get(ProductId(6)).map(Product::price),
            Some(Price::from_whole(15000))
        );
        assert_eq!(
            modal_message(&app).as_deref(),
            Some("Producto agregado correctamente.")
        );

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.screen.route(), Route::Products);
    }

    #[tokio::test]
    async fn test_edit_product_flow() {
        let (_auth, mut app) = signed_in_app();
        app.router.push(Route::Products).unwrap();
        app.sync_screen();

        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Char('e')));
        assert_eq!(app.screen.route(), Route::EditProduct(ProductId(2)));

        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::End));
        app.handle_key(key(KeyCode::Char('0')));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(
            app.catalog.get(ProductId(2)).map(Product::price),
            Some(Price::from_whole(90000))
        );
        assert_eq!(app.catalog.len(), 5);

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.screen.route(), Route::Products);
    }

    #[tokio::test]
    async fn test_cancelled_delete_keeps_catalog() {
        let (_auth, mut app) = signed_in_app();
        app.router.push(Route::Products).unwrap();
        app.sync_screen();

        app.handle_key(key(KeyCode::Char('d')));
        app.handle_key(key(KeyCode::Esc));

        assert_eq!(app.catalog.len(), 5);
        assert_eq!(modal_message(&app), None);
        assert_eq!(app.screen.route(), Route::Products);
    }

    #[tokio::test]
    async fn test_logout_returns_to_login() {
        let (auth, mut app) = signed_in_app();

        app.handle_key(key(KeyCode::Char('s')));
        app.handle_key(key(KeyCode::Enter));
        next_action(&mut app).await;

        assert_eq!(app.screen.route(), Route::Login);
        assert!(auth.calls().contains(&"sign_out"));
    }

    #[tokio::test]
    async fn test_failed_logout_stays_home() {
        let auth = Arc::new(MockAuthPort::new().fail_sign_out("auth/internal-error"));
        auth.watch().publish(Some(UserProfile::new("u1", "ana@pchela.com")));
        let mut app = app(&auth);

        app.handle_key(key(KeyCode::Char('s')));
        app.handle_key(key(KeyCode::Enter));
        next_action(&mut app).await;

        assert_eq!(app.screen.route(), Route::Home);
        assert_eq!(
            modal_message(&app).as_deref(),
            Some("Hubo un problema al cerrar sesión.")
        );
    }

    #[tokio::test]
    async fn test_profile_tabs() {
        let (_auth, mut app) = signed_in_app();

        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.screen.route(), Route::Profile);
        assert!(!app.router.can_go_back());

        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.screen.route(), Route::Home);
    }

    #[tokio::test]
    async fn test_quit_key() {
        let auth = Arc::new(MockAuthPort::new());
        let mut app = app(&auth);
        app.handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }
}
