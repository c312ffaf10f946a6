//! Weak listeners stop receiving notifications as soon as their owner drops them, without
//! having to unsubscribe.

use std::rc::{Rc, Weak};

use listeners::{BoxedListeners, LocalListeners};

struct Window {
    title: String,
}

impl Window {
    fn on_theme_changed(&self, theme: &str) {
        println!("{} switches to the {theme} theme", self.title);
    }
}

fn main() {
    let windows = LocalListeners::<Weak<Window>>::new();

    let main_window = Rc::new(Window {
        title: "main".to_owned(),
    });
    let settings = Rc::new(Window {
        title: "settings".to_owned(),
    });

    windows.add(Rc::downgrade(&main_window));
    windows.add(Rc::downgrade(&settings));

    windows.invoke(|window| window.on_theme_changed("dark"));

    // Closing the settings window is enough to stop notifying it.
    drop(settings);
    windows.invoke(|window| window.on_theme_changed("light"));

    println!(
        "{} handles stored, {} pruned",
        windows.len(),
        windows.prune_expired()
    );

    // Closures have no identity of their own, so the collection owns them and hands out keys.
    let hooks = BoxedListeners::<dyn Fn(&str)>::new();
    let key = hooks.add(Box::new(|theme| println!("hook sees {theme}")));
    hooks.invoke(|hook| hook("dark"));
    println!("removed hook {:?}", hooks.remove(key));
}
