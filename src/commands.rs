//! Console Commands Module
//!
//! Subcommands exposed to the operator. Each one is routed through the
//! access guard, runs the matching page operation and prints a table or
//! a notification.

use std::process::ExitCode;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use crate::gateway::ApiError;
use crate::guard::{Navigation, Route};
use crate::models::{ClienteInput, PagoInput, SerialErp, SerialInput, VendedorInput, VentaInput};
use crate::notify::Notification;
use crate::pages::{
    dashboard::{format_cop, DashboardPage}, ActivacionesPage, ClientesPage, GenerarClavePage, LoginPage,
    PagosSeccion, SerialesPage, VendedoresPage, VentaForm, VentasPage,
};
use crate::AppState;

type Outcome = Result<(), Notification>;

#[derive(Debug, Parser)]
#[command(
    name = "exogena-admin",
    about = "Exógena 2025: consola de administración de licencias",
    version
)]
pub struct Cli {
    /// Base URL of the API (default: $EXOGENA_API_URL or http://localhost:8000/api)
    #[arg(long, global = true, env = "EXOGENA_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start a session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "EXOGENA_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// End the current session
    Logout,
    /// Show the logged-in operator
    Whoami,
    /// Resolve a screen path through the access guard (e.g. /ventas/editar/3)
    Open { path: String },
    /// Headline figures
    Dashboard,
    #[command(subcommand)]
    Clientes(ClientesCmd),
    #[command(subcommand)]
    Vendedores(VendedoresCmd),
    #[command(subcommand)]
    Seriales(SerialesCmd),
    #[command(subcommand)]
    Ventas(VentasCmd),
    #[command(subcommand)]
    Pagos(PagosCmd),
    #[command(subcommand)]
    Activaciones(ActivacionesCmd),
    /// Generate a license key from a Base64 serial
    GenerarClave { serial: String },
}

#[derive(Debug, Subcommand)]
pub enum ClientesCmd {
    List {
        #[arg(long)]
        buscar: Option<String>,
    },
    Crear(ClienteArgs),
    Editar {
        id: i64,
        #[command(flatten)]
        campos: ClienteArgs,
    },
    Eliminar { id: i64 },
}

#[derive(Debug, Args)]
pub struct ClienteArgs {
    #[arg(long)]
    pub nit: Option<String>,
    #[arg(long)]
    pub razon_social: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub telefono: Option<String>,
    #[arg(long)]
    pub direccion: Option<String>,
    #[arg(long)]
    pub vendedor_id: Option<i64>,
    #[arg(long)]
    pub activo: Option<bool>,
}

impl ClienteArgs {
    fn apply(self, form: &mut ClienteInput) {
        set(&mut form.nit, self.nit);
        set(&mut form.razon_social, self.razon_social);
        set(&mut form.email, self.email);
        set(&mut form.telefono, self.telefono);
        set(&mut form.direccion, self.direccion);
        if self.vendedor_id.is_some() {
            form.vendedor_id = self.vendedor_id;
        }
        set(&mut form.activo, self.activo);
    }
}

#[derive(Debug, Subcommand)]
pub enum VendedoresCmd {
    List,
    Crear(VendedorArgs),
    Editar {
        id: i64,
        #[command(flatten)]
        campos: VendedorArgs,
    },
    Eliminar { id: i64 },
}

#[derive(Debug, Args)]
pub struct VendedorArgs {
    #[arg(long)]
    pub nombre: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub telefono: Option<String>,
    #[arg(long)]
    pub activo: Option<bool>,
}

impl VendedorArgs {
    fn apply(self, form: &mut VendedorInput) {
        set(&mut form.nombre, self.nombre);
        set(&mut form.email, self.email);
        set(&mut form.telefono, self.telefono);
        set(&mut form.activo, self.activo);
    }
}

#[derive(Debug, Subcommand)]
pub enum SerialesCmd {
    List {
        #[arg(long)]
        buscar: Option<String>,
    },
    /// Serials licensed to one client
    PorCliente { cliente_id: i64 },
    Crear(SerialArgs),
    Editar {
        id: i64,
        #[command(flatten)]
        campos: SerialArgs,
    },
    Eliminar { id: i64 },
}

#[derive(Debug, Args)]
pub struct SerialArgs {
    #[arg(long)]
    pub serial: Option<String>,
    #[arg(long)]
    pub software: Option<String>,
    #[arg(long)]
    pub cliente_id: Option<i64>,
    #[arg(long)]
    pub activo: Option<bool>,
}

impl SerialArgs {
    fn apply(self, form: &mut SerialInput) {
        set(&mut form.serial_erp, self.serial);
        set(&mut form.nombre_software, self.software);
        if self.cliente_id.is_some() {
            form.cliente_id = self.cliente_id;
        }
        set(&mut form.activo, self.activo);
    }
}

#[derive(Debug, Subcommand)]
pub enum VentasCmd {
    List {
        /// Tax year (default: current year)
        #[arg(long)]
        ano: Option<i32>,
        #[arg(long)]
        buscar: Option<String>,
    },
    Nueva(VentaArgs),
    Editar {
        id: i64,
        #[command(flatten)]
        campos: VentaArgs,
    },
    /// Sale with its payment history
    Detalle { id: i64 },
}

#[derive(Debug, Args)]
pub struct VentaArgs {
    #[arg(long)]
    pub cliente_id: Option<i64>,
    #[arg(long)]
    pub vendedor_id: Option<i64>,
    #[arg(long)]
    pub serial_id: Option<i64>,
    #[arg(long)]
    pub ano_gravable: Option<i32>,
    #[arg(long)]
    pub ano_venta: Option<i32>,
    #[arg(long)]
    pub valor: Option<f64>,
    #[arg(long)]
    pub observaciones: Option<String>,
}

impl VentaArgs {
    fn apply(self, form: &mut VentaInput) {
        if self.cliente_id.is_some() {
            form.cliente_id = self.cliente_id;
        }
        if self.vendedor_id.is_some() {
            form.vendedor_id = self.vendedor_id;
        }
        if self.serial_id.is_some() {
            form.serial_erp_id = self.serial_id;
        }
        set(&mut form.ano_gravable, self.ano_gravable);
        set(&mut form.ano_venta, self.ano_venta);
        set(&mut form.valor_total, self.valor);
        set(&mut form.observaciones, self.observaciones);
    }
}

#[derive(Debug, Subcommand)]
pub enum PagosCmd {
    List { venta_id: i64 },
    Registrar {
        venta_id: i64,
        #[arg(long)]
        monto: f64,
        #[arg(long, default_value = PagoInput::METODO_POR_DEFECTO)]
        metodo: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ActivacionesCmd {
    List {
        #[arg(long)]
        buscar: Option<String>,
    },
    Eliminar { id: i64 },
}

fn set<T>(field: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *field = value;
    }
}

/// Execute one command and report the outcome on stdout/stderr
pub async fn run(state: &AppState, command: Command) -> ExitCode {
    let result = match command {
        Command::Login { email, password } => login(state, &email, &password).await,
        Command::Logout => logout(state),
        Command::Whoami => whoami(state),
        Command::Open { path } => open(state, &path),
        Command::Dashboard => dashboard(state).await,
        Command::Clientes(cmd) => clientes(state, cmd).await,
        Command::Vendedores(cmd) => vendedores(state, cmd).await,
        Command::Seriales(cmd) => seriales(state, cmd).await,
        Command::Ventas(cmd) => ventas(state, cmd).await,
        Command::Pagos(cmd) => pagos(state, cmd).await,
        Command::Activaciones(cmd) => activaciones(state, cmd).await,
        Command::GenerarClave { serial } => generar_clave(state, &serial).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(notification) => {
            eprintln!("{}", notification);
            if state.navigator.current() == Route::Login && !state.sessions.is_authenticated() {
                eprintln!("Inicia sesión con `exogena-admin login --email <correo>`");
            }
            ExitCode::FAILURE
        }
    }
}

/// Gate a screen. Unauthenticated operators end up on the login screen.
fn enter(state: &AppState, route: Route) -> Outcome {
    match state.visit(route) {
        Navigation::Render(_) => Ok(()),
        Navigation::Redirect(Route::Login) => Err(Notification::warn("No hay una sesión activa")),
        Navigation::Redirect(other) => Err(Notification::info("Redirección", other.path())),
    }
}

fn failed(context: &'static str) -> impl Fn(ApiError) -> Notification {
    move |err| {
        debug!("{} failed: {}", context, err);
        Notification::from_error(context, &err)
    }
}

async fn login(state: &AppState, email: &str, password: &str) -> Outcome {
    let page = LoginPage::new(state);

    if let Navigation::Redirect(_) = page.open() {
        let name = state
            .sessions
            .current()
            .map(|s| s.user.display_name().to_string())
            .unwrap_or_default();
        println!("Ya hay una sesión activa ({}).", name);
        return Ok(());
    }

    let user = page
        .submit(email, password)
        .await
        .map_err(|e| LoginPage::error_notification(&e))?;
    println!("{}", LoginPage::welcome(&user));
    Ok(())
}

fn logout(state: &AppState) -> Outcome {
    state.sessions.logout();
    state.navigator.redirect(Route::Login);
    println!("Sesión cerrada.");
    Ok(())
}

fn whoami(state: &AppState) -> Outcome {
    let session = state
        .sessions
        .current()
        .ok_or_else(|| Notification::warn("No hay una sesión activa"))?;
    let user = &session.user;
    println!(
        "{} <{}> (id {})",
        user.display_name(),
        user.email.as_deref().unwrap_or("-"),
        user.id
    );
    Ok(())
}

fn open(state: &AppState, path: &str) -> Outcome {
    match state.guard.resolve_path(path) {
        Navigation::Render(route) => {
            state.navigator.navigate(route);
            println!("{}", route);
        }
        Navigation::Redirect(route) => {
            state.navigator.redirect(route);
            println!("{} -> {}", path, route);
        }
    }
    Ok(())
}

async fn dashboard(state: &AppState) -> Outcome {
    enter(state, Route::Dashboard)?;
    let stats = DashboardPage::new(&state.api)
        .load()
        .await
        .map_err(failed("Error cargando estadísticas"))?;

    for card in DashboardPage::cards(&stats) {
        println!("{:<20} {:>18}   {}", card.label, card.value, card.detail);
    }
    println!();
    println!("{}", DashboardPage::VENTAS_POR_ANO);
    println!("{}", DashboardPage::ventas_por_ano(&stats));
    Ok(())
}

async fn clientes(state: &AppState, cmd: ClientesCmd) -> Outcome {
    enter(state, Route::Clientes)?;
    let page = ClientesPage::new(&state.api);

    match cmd {
        ClientesCmd::List { buscar } => {
            let data = page.load().await.map_err(failed("No se pudieron cargar los datos"))?;
            let rows = data
                .search(buscar.as_deref().unwrap_or(""))
                .into_iter()
                .map(|c| {
                    vec![
                        c.id.to_string(),
                        c.nit.clone(),
                        c.razon_social.clone(),
                        c.email.clone().unwrap_or_default(),
                        c.vendedor_nombre().unwrap_or("").to_string(),
                        c.serial_count().to_string(),
                        estado(c.activo),
                    ]
                })
                .collect();
            print_table(&["ID", "NIT", "RAZÓN SOCIAL", "EMAIL", "VENDEDOR", "SERIALES", "ESTADO"], rows);
        }
        ClientesCmd::Crear(campos) => {
            let mut form = ClienteInput::default();
            campos.apply(&mut form);
            report(page.save(&form).await.map_err(failed("Error al guardar"))?);
        }
        ClientesCmd::Editar { id, campos } => {
            let cliente = page.get(id).await.map_err(failed("No se pudo cargar el cliente"))?;
            let mut form = ClienteInput::from(&cliente);
            campos.apply(&mut form);
            report(page.save(&form).await.map_err(failed("Error al guardar"))?);
        }
        ClientesCmd::Eliminar { id } => {
            report(page.delete(id).await.map_err(failed("Error al eliminar"))?);
        }
    }
    Ok(())
}

async fn vendedores(state: &AppState, cmd: VendedoresCmd) -> Outcome {
    enter(state, Route::Vendedores)?;
    let page = VendedoresPage::new(&state.api);

    match cmd {
        VendedoresCmd::List => {
            let vendedores = page.load().await.map_err(failed("Error al cargar vendedores"))?;
            let rows = vendedores
                .iter()
                .map(|v| {
                    vec![
                        v.id.to_string(),
                        v.nombre.clone(),
                        v.email.clone().unwrap_or_default(),
                        v.telefono.clone().unwrap_or_default(),
                        v.count.clientes.to_string(),
                        estado(v.activo),
                    ]
                })
                .collect();
            print_table(&["ID", "NOMBRE", "EMAIL", "TELÉFONO", "CLIENTES", "ESTADO"], rows);
        }
        VendedoresCmd::Crear(campos) => {
            let mut form = VendedorInput::default();
            campos.apply(&mut form);
            report(page.save(&form).await.map_err(failed("Error al guardar"))?);
        }
        VendedoresCmd::Editar { id, campos } => {
            let vendedor = page.get(id).await.map_err(failed("No se pudo cargar el vendedor"))?;
            let mut form = VendedorInput::from(&vendedor);
            campos.apply(&mut form);
            report(page.save(&form).await.map_err(failed("Error al guardar"))?);
        }
        VendedoresCmd::Eliminar { id } => {
            report(page.delete(id).await.map_err(failed("Error al eliminar"))?);
        }
    }
    Ok(())
}

async fn seriales(state: &AppState, cmd: SerialesCmd) -> Outcome {
    enter(state, Route::Seriales)?;
    let page = SerialesPage::new(&state.api);

    match cmd {
        SerialesCmd::List { buscar } => {
            let data = page.load().await.map_err(failed("Error al cargar datos"))?;
            print_seriales(data.search(buscar.as_deref().unwrap_or("")));
        }
        SerialesCmd::PorCliente { cliente_id } => {
            let seriales = page
                .por_cliente(cliente_id)
                .await
                .map_err(failed("Error al cargar seriales"))?;
            print_seriales(seriales.iter().collect());
        }
        SerialesCmd::Crear(campos) => {
            let mut form = SerialInput::default();
            campos.apply(&mut form);
            report(page.save(&form).await.map_err(failed("Error al guardar"))?);
        }
        SerialesCmd::Editar { id, campos } => {
            let serial = page.get(id).await.map_err(failed("No se pudo cargar el serial"))?;
            let mut form = SerialInput::from(&serial);
            campos.apply(&mut form);
            report(page.save(&form).await.map_err(failed("Error al guardar"))?);
        }
        SerialesCmd::Eliminar { id } => {
            report(page.delete(id).await.map_err(failed("No se pudo eliminar"))?);
        }
    }
    Ok(())
}

fn print_seriales(seriales: Vec<&SerialErp>) {
    let rows = seriales
        .into_iter()
        .map(|s| {
            let cliente = s.clientes.clone().unwrap_or_default();
            vec![
                s.id.to_string(),
                s.serial_erp.clone(),
                s.nombre_software.clone(),
                format!("{} ({})", cliente.razon_social, cliente.nit),
                estado(s.activo),
            ]
        })
        .collect();
    print_table(&["ID", "SERIAL", "SOFTWARE", "CLIENTE", "ESTADO"], rows);
}

async fn ventas(state: &AppState, cmd: VentasCmd) -> Outcome {
    let now = Utc::now();

    match cmd {
        VentasCmd::List { ano, buscar } => {
            enter(state, Route::Ventas)?;
            let ano = ano.unwrap_or_else(|| VentasPage::ano_actual(now));
            let ventas = VentasPage::new(&state.api)
                .load(ano)
                .await
                .map_err(failed("Error al cargar ventas"))?;

            let rows = VentasPage::search(&ventas, buscar.as_deref().unwrap_or(""))
                .into_iter()
                .map(|v| {
                    let cliente = v.clientes.clone().unwrap_or_default();
                    vec![
                        v.id.to_string(),
                        fecha(v.fecha_venta),
                        cliente.razon_social,
                        v.seriales_erp.as_ref().map(|s| s.serial_erp.clone()).unwrap_or_default(),
                        v.vendedores.as_ref().map(|s| s.nombre.clone()).unwrap_or_default(),
                        format_cop(v.valor_total),
                        v.estado().to_string(),
                    ]
                })
                .collect();
            println!("Ventas {}", ano);
            print_table(&["ID", "FECHA", "CLIENTE", "SERIAL", "VENDEDOR", "VALOR", "ESTADO"], rows);
        }
        VentasCmd::Nueva(campos) => {
            enter(state, Route::VentaNueva)?;
            save_venta(state, VentaForm::new(&state.api, None), campos, now).await?;
        }
        VentasCmd::Editar { id, campos } => {
            enter(state, Route::VentaEditar(id))?;
            save_venta(state, VentaForm::new(&state.api, Some(id)), campos, now).await?;
        }
        VentasCmd::Detalle { id } => {
            enter(state, Route::VentaDetalle(id))?;
            let venta = VentasPage::new(&state.api)
                .get(id)
                .await
                .map_err(failed("No se pudo cargar la venta"))?;
            let cliente = venta.clientes.clone().unwrap_or_default();

            println!("Venta #{}  {}  {}", venta.id, fecha(venta.fecha_venta), venta.estado());
            println!("Cliente: {} (NIT {})", cliente.razon_social, cliente.nit);
            println!("Valor:   {}", format_cop(venta.valor_total));
            println!(
                "Saldo:   {}",
                format_cop(venta.resumen_financiero.saldo_pendiente)
            );
            print_pagos(&PagosSeccion::new(state.api.clone(), Some(id))).await?;
        }
    }
    Ok(())
}

async fn save_venta(
    state: &AppState,
    form_page: VentaForm<'_>,
    campos: VentaArgs,
    now: DateTime<Utc>,
) -> Outcome {
    let mut data = form_page
        .load(now)
        .await
        .map_err(failed("No se pudo conectar con el servidor"))?;

    if let Some(cliente_id) = campos.cliente_id {
        if data.venta.cliente_id != Some(cliente_id) {
            form_page
                .seleccionar_cliente(&mut data, cliente_id)
                .await
                .map_err(failed("Error al cargar seriales"))?;
        }
    }
    campos.apply(&mut data.venta);

    if data.venta.cliente_id.is_some() && !data.serial_disponible() {
        debug!(serial_id = ?data.venta.serial_erp_id, opciones = data.seriales.len(), "Serial not offered");
        return Err(Notification::warn("El serial no pertenece al cliente seleccionado"));
    }

    let notification = form_page
        .save(&data.venta, &state.navigator)
        .await
        .map_err(failed("Error al guardar"))?;
    report(notification);
    Ok(())
}

async fn pagos(state: &AppState, cmd: PagosCmd) -> Outcome {
    match cmd {
        PagosCmd::List { venta_id } => {
            enter(state, Route::VentaDetalle(venta_id))?;
            print_pagos(&PagosSeccion::new(state.api.clone(), Some(venta_id))).await
        }
        PagosCmd::Registrar { venta_id, monto, metodo } => {
            enter(state, Route::VentaDetalle(venta_id))?;
            let seccion = PagosSeccion::new(state.api.clone(), Some(venta_id));
            let pago = PagoInput {
                metodo_pago: metodo,
                ..PagoInput::new(monto, Utc::now())
            };
            report(seccion.registrar(&pago).await.map_err(failed("Error al registrar pago"))?);
            print_historial(&seccion);
            Ok(())
        }
    }
}

async fn print_pagos(seccion: &PagosSeccion) -> Outcome {
    seccion.load().await.map_err(failed("Error al obtener pagos"))?;
    print_historial(seccion);
    Ok(())
}

fn print_historial(seccion: &PagosSeccion) {
    let rows = seccion
        .pagos()
        .iter()
        .map(|p| {
            vec![
                fecha(p.fecha_pago),
                p.metodo_pago.clone(),
                format_cop(p.monto_pagado),
            ]
        })
        .collect();
    print_table(&["FECHA", "MÉTODO", "MONTO"], rows);
    println!("Total abonado: {}", format_cop(seccion.total_pagado()));
}

async fn activaciones(state: &AppState, cmd: ActivacionesCmd) -> Outcome {
    enter(state, Route::Activaciones)?;
    let page = ActivacionesPage::new(&state.api);

    match cmd {
        ActivacionesCmd::List { buscar } => {
            let activaciones = page.load().await.map_err(failed("Error al cargar activaciones"))?;
            let rows = ActivacionesPage::search(&activaciones, buscar.as_deref().unwrap_or(""))
                .into_iter()
                .map(|a| {
                    let cliente = a.cliente().cloned().unwrap_or_default();
                    vec![
                        a.id.to_string(),
                        a.fecha_activacion
                            .map(|d| d.format("%d/%m/%Y %H:%M").to_string())
                            .unwrap_or_default(),
                        if cliente.razon_social.is_empty() { "N/A".into() } else { cliente.razon_social },
                        a.serial().map(|s| s.serial_erp.clone()).unwrap_or_default(),
                        a.nombre_equipo.clone().unwrap_or_default(),
                        a.mac_servidor.clone().unwrap_or_default(),
                        a.ip_origen.clone().unwrap_or_default(),
                    ]
                })
                .collect();
            print_table(&["ID", "FECHA", "CLIENTE", "SERIAL", "EQUIPO", "MAC", "IP ORIGEN"], rows);
        }
        ActivacionesCmd::Eliminar { id } => {
            report(page.delete(id).await.map_err(failed("Error al eliminar:"))?);
        }
    }
    Ok(())
}

async fn generar_clave(state: &AppState, serial: &str) -> Outcome {
    enter(state, Route::GenerarClave)?;

    let clave = GenerarClavePage::new(&state.api)
        .generar(serial)
        .await
        .map_err(|e| GenerarClavePage::error_notification(&e))?;

    report(Notification::success("Clave generada correctamente"));
    println!("Serial ERP:     {}", clave.serial_erp);
    let ano = match &clave.ano_medios {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    println!("Año medios:     {}", ano);
    println!("MAC servidor:   {}", clave.mac_servidor);
    println!("Clave generada: {}", clave.clave_generada);
    Ok(())
}

fn report(notification: Notification) {
    println!("{}", notification);
}

fn estado(activo: bool) -> String {
    if activo { "ACTIVO" } else { "INACTIVO" }.to_string()
}

fn fecha(value: Option<DateTime<Utc>>) -> String {
    value.map(|d| d.format("%d/%m/%Y").to_string()).unwrap_or_default()
}

fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    if rows.is_empty() {
        println!("(sin registros)");
        return;
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let render = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
    };

    println!("{}", render(headers.to_vec()));
    for row in &rows {
        println!("{}", render(row.iter().map(String::as_str).collect()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_entity_commands() {
        let cli = Cli::try_parse_from([
            "exogena-admin",
            "clientes",
            "editar",
            "7",
            "--razon-social",
            "Acme S.A.S",
            "--vendedor-id",
            "3",
        ])
        .unwrap();

        match cli.command {
            Command::Clientes(ClientesCmd::Editar { id, campos }) => {
                assert_eq!(id, 7);
                assert_eq!(campos.razon_social.as_deref(), Some("Acme S.A.S"));
                assert_eq!(campos.vendedor_id, Some(3));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn payment_method_defaults_to_transfer() {
        let cli = Cli::try_parse_from(["exogena-admin", "pagos", "registrar", "4", "--monto", "50000"]).unwrap();
        match cli.command {
            Command::Pagos(PagosCmd::Registrar { venta_id, monto, metodo }) => {
                assert_eq!(venta_id, 4);
                assert_eq!(monto, 50000.0);
                assert_eq!(metodo, "transferencia");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn edit_arguments_only_override_given_fields() {
        let mut form = ClienteInput {
            id: Some(1),
            nit: "900".into(),
            razon_social: "Acme".into(),
            vendedor_id: Some(2),
            ..Default::default()
        };
        ClienteArgs {
            nit: None,
            razon_social: Some("Acme Ltda".into()),
            email: None,
            telefono: None,
            direccion: None,
            vendedor_id: None,
            activo: Some(false),
        }
        .apply(&mut form);

        assert_eq!(form.nit, "900");
        assert_eq!(form.razon_social, "Acme Ltda");
        assert_eq!(form.vendedor_id, Some(2));
        assert!(!form.activo);
    }
}
